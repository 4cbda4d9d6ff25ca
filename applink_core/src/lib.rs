pub mod app_state;
pub mod capabilities;
pub mod connection;
pub mod correlation;
pub mod dispatcher;
pub mod file_store;
mod hmi;
pub mod ids;
pub mod manager;
mod mobile;
pub mod protocol;
pub mod registry;
pub mod syncp;
pub mod translate;

pub use crate::app_state::{AppState, CommandParams, CommandType};
pub use crate::capabilities::CapabilityCache;
pub use crate::connection::{ConnectionHandler, DeviceHandle, DeviceInfo};
pub use crate::correlation::CorrelationTables;
pub use crate::dispatcher::{Dispatcher, DispatcherHandle};
pub use crate::file_store::{sandbox_dir, DiskFileStore, FileStore, FileStoreError};
pub use crate::ids::IdAllocator;
pub use crate::manager::{AppManager, CoreConfig};
pub use crate::protocol::{
    MobileInbound, MobileOutbound, HMI_IN_CAP, HMI_OUT_CAP, MOBILE_IN_CAP, MOBILE_OUT_CAP,
};
pub use crate::registry::{ActivationState, Registry};
pub use crate::syncp::{parse_url, PostJob, PostPool, SyncPBuffer, SyncPError};
