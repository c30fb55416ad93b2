//! Bridge link tasks
//!
//! The BLE radio lives on a bridge module behind UART0. The bridge hosts
//! the time service and forwards characteristic writes and connection
//! changes as frames. RX dispatches those, TX answers heartbeats and
//! keeps the characteristic value current.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Duration, Timer};
use embedded_io_async::{Read, Write};
use portable_atomic::Ordering;

use nixie_protocol::{BridgeEvent, ClockCommand, FrameParser, TimeValue};

use crate::channels::{ADVERTISE_REQUEST, CONNECTED, PING_RECEIVED, TIME_REPORT, TIME_UPDATE};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Delay before retrying a failed advertise
const ADVERTISE_RETRY: Duration = Duration::from_secs(1);

/// Link RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeEvent::from_frame(&frame) {
                            Ok(event) => handle_event(event),
                            Err(e) => warn!("Failed to parse bridge event: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

/// Handle a parsed bridge event
fn handle_event(event: BridgeEvent) {
    if event.requests_advertise() {
        ADVERTISE_REQUEST.signal(());
    }

    match event {
        BridgeEvent::TimeWritten(value) => {
            debug!("Time written: {}:{}", value.hour, value.minute);
            TIME_UPDATE.signal(value);
        }
        BridgeEvent::Connected => {
            info!("Central connected");
            CONNECTED.store(true, Ordering::Relaxed);
        }
        BridgeEvent::Disconnected => {
            info!("Central disconnected");
            CONNECTED.store(false, Ordering::Relaxed);
        }
        BridgeEvent::Ping => {
            trace!("PING received");
            PING_RECEIVED.signal(());
        }
        BridgeEvent::Ready { ok: true } => info!("Bridge advertising"),
        BridgeEvent::Ready { ok: false } => warn!("Bridge failed to start advertising, retrying"),
    }
}

/// Link TX task - sets up advertising, then serves heartbeats and reports
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx, name: &'static str) {
    info!("Link TX task started");

    send(&mut tx, ClockCommand::Advertise { name }).await;

    loop {
        let event = select3(
            PING_RECEIVED.wait(),
            TIME_REPORT.wait(),
            ADVERTISE_REQUEST.wait(),
        )
        .await;

        match event {
            Either3::First(()) => send(&mut tx, ClockCommand::Pong).await,
            Either3::Second(time) => match TimeValue::new(time.hour(), time.minute()) {
                Ok(value) => send(&mut tx, ClockCommand::Report(value)).await,
                Err(e) => warn!("Cannot report time: {:?}", e),
            },
            Either3::Third(()) => {
                Timer::after(ADVERTISE_RETRY).await;
                send(&mut tx, ClockCommand::Advertise { name }).await;
            }
        }
    }
}

/// Encode and write one command
async fn send(tx: &mut BufferedUartTx, command: ClockCommand<'_>) {
    let frame = match command.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode command: {:?}", e);
            return;
        }
    };

    if let Err(e) = tx.write_all(&frame.to_bytes()).await {
        warn!("UART write error: {:?}", e);
    } else {
        trace!("TX: kind {=u8:#x}", frame.kind);
    }
}
