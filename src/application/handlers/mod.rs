//! Application handlers.
//!
//! Navigation commands arrive over HTTP and answer their caller; process
//! events arrive from the engine and only ever log their failures.

pub mod navigation;
pub mod process_events;

pub use navigation::{
    CloseCommand, CloseHandler, ConfirmCommand, ConfirmHandler, DetailsCommand, DetailsHandler,
    NextCommand, NextHandler, PopupHandler, PreviousCommand, PreviousHandler,
    ShowAdditionalContentCommand, ShowContactsCommand, StartSupportCommand, StartSupportHandler,
};
pub use process_events::{
    AutomatedFlowHandler, CallActivityHandler, ProcessEventRouter, ProcessLifecycleHandler,
    TaskProgressHandler, UserRequestHandler,
};
