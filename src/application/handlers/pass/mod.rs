//! Pass operation handlers.

mod build_pass;
mod poll_updates;
mod record_logs;
mod register_device;

pub use build_pass::{BuildPassCommand, BuildPassHandler, BuiltPass};
pub use poll_updates::{PollOutcome, PollUpdatesHandler, PollUpdatesQuery};
pub use record_logs::{RecordLogsCommand, RecordLogsHandler};
pub use register_device::{
    RegisterDeviceCommand, RegisterDeviceHandler, UnregisterDeviceCommand, UnregisterDeviceHandler,
};
