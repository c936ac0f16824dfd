mod ble_host;
mod link;
mod render;

pub use ble_host::ble_host_task;
pub use link::link_task;
pub use render::render_task;
