// Module exports for models

pub mod cell;
pub mod context_target;
pub mod event_ref;
pub mod intent;
pub mod marker;
pub mod menu;
pub mod selection;
pub mod settings;
pub mod subject;
