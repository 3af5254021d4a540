// Test fixtures - reusable roster data
// Provides consistent subjects, users and targets across all test files

#![allow(dead_code)]

use std::rc::Rc;

use chrono::NaiveDate;
use roster_grid::models::cell::DateCell;
use roster_grid::models::context_target::ContextTarget;
use roster_grid::models::event_ref::{EventRef, EventType};
use roster_grid::models::settings::EngineSettings;
use roster_grid::models::subject::{ActingUser, Subject};
use roster_grid::services::collaborators::CellContextResolver;
use roster_grid::services::notification::ToastQueue;
use roster_grid::GridEngine;

/// Day `d` of March 2025
pub fn march(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

pub mod subjects {
    use super::*;

    pub fn anna() -> Subject {
        Subject::new(1, "anna", "Anna de Vries")
    }

    pub fn bram() -> Subject {
        Subject::new(2, "bram", "Bram Visser")
    }
}

pub mod users {
    use super::*;

    /// Regular employee, owns row 1
    pub fn anna() -> ActingUser {
        ActingUser::new(1, "CORP\\Anna", "Anna de Vries").with_roles(["Medewerkers"])
    }

    /// Team lead, elevated through a substring match on "teamleider"
    pub fn lotte() -> ActingUser {
        ActingUser::new(3, "lotte", "Lotte Smit").with_roles(["Medewerkers", "Teamleiders Zorg"])
    }
}

pub fn empty_cell(subject: Subject, date: NaiveDate) -> ContextTarget {
    let cell = DateCell::new(subject.id, date);
    ContextTarget::empty_cell(subject, cell)
}

pub fn event_cell(subject: Subject, date: NaiveDate, id: i64, owner: &str) -> ContextTarget {
    let cell = DateCell::new(subject.id, date);
    ContextTarget::on_event(subject, cell, EventRef::new(id, EventType::Leave, owner))
}

/// Resolver that always reports the same target
pub struct FixedResolver(pub ContextTarget);

impl CellContextResolver for FixedResolver {
    type Target = ();

    fn resolve_cell_context(&self, _target: &()) -> ContextTarget {
        self.0.clone()
    }
}

pub fn engine_for(user: ActingUser) -> (GridEngine, Rc<ToastQueue>) {
    let toasts = Rc::new(ToastQueue::new());
    let engine = GridEngine::new(EngineSettings::default(), user, toasts.clone());
    (engine, toasts)
}
