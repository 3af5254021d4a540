// Service module exports

pub mod collaborators;
pub mod context_menu;
pub mod dispatcher;
pub mod engine;
pub mod intent;
pub mod notification;
pub mod permission;
pub mod replay;
pub mod selection;
pub mod settings;
