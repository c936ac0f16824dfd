//! BLE transport
//!
//! The host side runs the trouble-host GATT server and feeds written UART
//! bytes into a pipe. The link side ([`BlePeerLink`]) reads that pipe and
//! observes the connection through the shared [`BleBridge`].

use core::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use embassy_futures::{
    join::join,
    select::{Either, select},
};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, pipe::Pipe, signal::Signal};
use embassy_time::{Duration, Timer};
use embedded_io::{ErrorKind, ErrorType, ReadReady};
use embedded_io_async::Read;
use log::{error, info, warn};
use trouble_host::prelude::*;
use twintail_remote::{PeerLink, Telemetry};

use crate::{config, infrastructure::types::BleController};

/// Max number of connections
const CONNECTIONS_MAX: usize = 1;

/// Max number of L2CAP channels
const L2CAP_CHANNELS_MAX: usize = 2; // Signal + att

/// Received bytes not yet decoded
const RX_BUFFER_LEN: usize = 256;

/// Largest UART write with the default ATT MTU
const UART_PAYLOAD_LEN: usize = 20;

const ADVERTISE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Nordic UART service, little-endian
const NUS_SERVICE_UUID: [u8; 16] = [
    0x9e, 0xca, 0xdc, 0x24, 0x0e, 0xe5, 0xa9, 0xe0, 0x93, 0xf3, 0xa3, 0xb5, 0x01, 0x00, 0x40, 0x6e,
];

#[gatt_server]
pub struct AccessoryServer {
    uart: UartService,
    battery: BatteryService,
    controls: ControlsService,
}

#[gatt_service(uuid = "6e400001-b5a3-f393-e0a9-e50e24dcca9e")]
struct UartService {
    /// Peer to accessory
    #[characteristic(uuid = "6e400002-b5a3-f393-e0a9-e50e24dcca9e", write, write_without_response)]
    rx: [u8; UART_PAYLOAD_LEN],
    /// Accessory to peer, unused but expected by the app
    #[characteristic(uuid = "6e400003-b5a3-f393-e0a9-e50e24dcca9e", notify)]
    tx: [u8; UART_PAYLOAD_LEN],
}

#[gatt_service(uuid = service::BATTERY)]
struct BatteryService {
    #[characteristic(uuid = characteristic::BATTERY_LEVEL, read)]
    level: u8,
}

#[gatt_service(uuid = "77791967-b5c7-4a0f-842f-d28bfa439742")]
struct ControlsService {
    #[characteristic(uuid = "77791968-b5c7-4a0f-842f-d28bfa439742", read, value = 1)]
    speed: u8,
}

/// State shared between the BLE host task and the link supervisor
pub(crate) struct BleBridge {
    rx: Pipe<CriticalSectionRawMutex, RX_BUFFER_LEN>,
    connected: AtomicBool,
    advertise: Signal<CriticalSectionRawMutex, ()>,
    disconnected: Signal<CriticalSectionRawMutex, ()>,
    telemetry: Signal<CriticalSectionRawMutex, Telemetry>,
}

pub(crate) static BRIDGE: BleBridge = BleBridge::new();

impl BleBridge {
    const fn new() -> Self {
        Self {
            rx: Pipe::new(),
            connected: AtomicBool::new(false),
            advertise: Signal::new(),
            disconnected: Signal::new(),
            telemetry: Signal::new(),
        }
    }

    fn session_started(&self) {
        self.rx.clear();
        self.disconnected.reset();
        self.connected.store(true, Ordering::Relaxed);
    }

    fn session_ended(&self) {
        self.connected.store(false, Ordering::Relaxed);
        self.disconnected.signal(());
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BleLinkError {
    /// The peer went away, possibly in the middle of a read
    Disconnected,
}

impl fmt::Display for BleLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "peer disconnected"),
        }
    }
}

impl embedded_io::Error for BleLinkError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Disconnected => ErrorKind::NotConnected,
        }
    }
}

/// Link supervisor's handle on the BLE transport
#[derive(Debug, Default)]
pub struct BlePeerLink;

impl ErrorType for BlePeerLink {
    type Error = BleLinkError;
}

impl Read for BlePeerLink {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if !BRIDGE.is_connected() {
            return Err(BleLinkError::Disconnected);
        }
        match select(BRIDGE.rx.read(buf), BRIDGE.disconnected.wait()).await {
            Either::First(count) => Ok(count),
            Either::Second(()) => Err(BleLinkError::Disconnected),
        }
    }
}

impl ReadReady for BlePeerLink {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!BRIDGE.rx.is_empty())
    }
}

impl PeerLink for BlePeerLink {
    fn advertise(&mut self) -> Result<(), Self::Error> {
        BRIDGE.advertise.signal(());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        BRIDGE.is_connected()
    }

    fn publish(&mut self, telemetry: &Telemetry) {
        BRIDGE.telemetry.signal(*telemetry);
    }
}

/// Run the BLE host, serving one peer at a time
pub async fn run_host(controller: BleController) {
    let address = Address::random(config::BLE.address);
    info!("ble: address {:?}", address);

    let mut resources: HostResources<DefaultPacketPool, CONNECTIONS_MAX, L2CAP_CHANNELS_MAX> =
        HostResources::new();
    let stack = trouble_host::new(controller, &mut resources).set_random_address(address);
    let Host {
        mut peripheral,
        runner,
        ..
    } = stack.build();

    let server = match AccessoryServer::new_with_config(GapConfig::Peripheral(PeripheralConfig {
        name: config::BLE.name,
        appearance: &appearance::power_device::GENERIC_POWER_DEVICE,
    })) {
        Ok(server) => server,
        Err(err) => {
            error!("ble: failed to build GATT server: {}", err);
            return;
        }
    };

    join(host_runner(runner), serve(&mut peripheral, &server)).await;
}

async fn host_runner<C: Controller, P: PacketPool>(mut runner: Runner<'_, C, P>) {
    loop {
        if let Err(err) = runner.run().await {
            error!("ble: host runner stopped: {:?}", err);
        }
    }
}

async fn serve<'values, C: Controller>(
    peripheral: &mut Peripheral<'values, C, DefaultPacketPool>,
    server: &AccessoryServer<'values>,
) {
    loop {
        BRIDGE.advertise.wait().await;

        let conn = loop {
            match advertise(config::BLE.name, peripheral, server).await {
                Ok(conn) => break conn,
                Err(err) => {
                    warn!("ble: advertising failed: {:?}", err);
                    Timer::after(ADVERTISE_RETRY_DELAY).await;
                }
            }
        };

        BRIDGE.session_started();
        select(gatt_events(server, &conn), publish_telemetry(server)).await;
        BRIDGE.session_ended();
    }
}

async fn advertise<'values, 'server, C: Controller>(
    name: &'values str,
    peripheral: &mut Peripheral<'values, C, DefaultPacketPool>,
    server: &'server AccessoryServer<'values>,
) -> Result<GattConnection<'values, 'server, DefaultPacketPool>, BleHostError<C::Error>> {
    let mut adv_data = [0; 31];
    let adv_len = AdStructure::encode_slice(
        &[
            AdStructure::Flags(LE_GENERAL_DISCOVERABLE | BR_EDR_NOT_SUPPORTED),
            AdStructure::ServiceUuids128(&[NUS_SERVICE_UUID]),
        ],
        &mut adv_data[..],
    )?;
    let mut scan_data = [0; 31];
    let scan_len = AdStructure::encode_slice(
        &[AdStructure::CompleteLocalName(name.as_bytes())],
        &mut scan_data[..],
    )?;

    let advertiser = peripheral
        .advertise(
            &AdvertisementParameters::default(),
            Advertisement::ConnectableScannableUndirected {
                adv_data: &adv_data[..adv_len],
                scan_data: &scan_data[..scan_len],
            },
        )
        .await?;
    let conn = advertiser.accept().await?.with_attribute_server(server)?;
    info!("ble: peer connected");
    Ok(conn)
}

/// Forward UART writes into the bridge until the peer disconnects
async fn gatt_events(server: &AccessoryServer<'_>, conn: &GattConnection<'_, '_, DefaultPacketPool>) {
    let rx = server.uart.rx.handle;
    loop {
        match conn.next().await {
            GattConnectionEvent::Disconnected { reason } => {
                info!("ble: peer disconnected: {:?}", reason);
                return;
            }
            GattConnectionEvent::Gatt { event } => {
                if let GattEvent::Write(write) = &event {
                    if write.handle() == rx {
                        let data = write.data();
                        let written = BRIDGE.rx.try_write(data).unwrap_or(0);
                        if written < data.len() {
                            warn!("ble: rx buffer full, dropped {} bytes", data.len() - written);
                        }
                    }
                }
                match event.accept() {
                    Ok(reply) => reply.send().await,
                    Err(err) => warn!("ble: failed to reply: {:?}", err),
                }
            }
            _ => {}
        }
    }
}

/// Mirror the latest telemetry into the passive characteristics
async fn publish_telemetry(server: &AccessoryServer<'_>) {
    loop {
        let telemetry = BRIDGE.telemetry.wait().await;
        if let Some(percent) = telemetry.battery_percent {
            if let Err(err) = server.set(&server.battery.level, &percent) {
                warn!("ble: failed to update battery level: {:?}", err);
            }
        }
        if let Err(err) = server.set(&server.controls.speed, &telemetry.speed) {
            warn!("ble: failed to update speed: {:?}", err);
        }
    }
}
