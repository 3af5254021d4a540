//! Scripted gesture replay.
//!
//! A JSON script describes the acting user, a small roster grid and a list of
//! gestures. The replay drives a [`GridEngine`] through them with an in-memory
//! host and reports what happened at every step.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::models::cell::DateCell;
use crate::models::context_target::ContextTarget;
use crate::models::event_ref::{EventRef, EventType};
use crate::models::intent::Intent;
use crate::models::marker::MarkerDiff;
use crate::models::menu::{MenuAction, MenuCommand, MenuEntry, MenuGate};
use crate::models::selection::Selection;
use crate::models::settings::EngineSettings;
use crate::models::subject::{ActingUser, Subject};
use crate::services::collaborators::{
    CellContextResolver, Confirmer, ModalOpener, Notifier, NotifyLevel, RecordStore,
};
use crate::services::context_menu::DismissReason;
use crate::services::dispatcher::DispatchOutcome;
use crate::services::engine::GridEngine;
use crate::services::notification::ToastQueue;
use crate::utils::date::today;

const MENU_WIDTH: f32 = 200.0;
const MENU_ROW_HEIGHT: f32 = 28.0;
const DEFAULT_VIEWPORT: [f32; 2] = [1280.0, 800.0];

/// A roster record placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridEvent {
    pub id: i64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub owner_username: String,
    pub subject_id: i64,
    pub start: NaiveDate,
    /// Defaults to `start`
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl GridEvent {
    fn covers(&self, subject_id: i64, date: NaiveDate) -> bool {
        let end = self.end.unwrap_or(self.start);
        self.subject_id == subject_id && self.start <= date && date <= end
    }

    fn to_event_ref(&self) -> EventRef {
        EventRef::new(self.id, self.event_type, self.owner_username.clone())
    }
}

/// Where a right-click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub subject_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Select {
        subject_id: i64,
        date: NaiveDate,
    },
    SelectRow {
        subject_id: i64,
    },
    ContextMenu {
        #[serde(default)]
        subject_id: Option<i64>,
        #[serde(default)]
        date: Option<NaiveDate>,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    OpenSubmenu,
    Activate {
        action: MenuAction,
        #[serde(default)]
        event_type: Option<EventType>,
    },
    Dismiss {
        reason: DismissReason,
    },
    Escape,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub settings: Option<EngineSettings>,
    pub user: ActingUser,
    /// Fallback date for "create"; defaults to the real today
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub confirm_deletes: bool,
    #[serde(default)]
    pub viewport: Option<[f32; 2]>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub events: Vec<GridEvent>,
    pub gestures: Vec<Gesture>,
}

impl Script {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse replay script")
    }

    fn subject(&self, id: i64) -> Result<&Subject> {
        match self.subjects.iter().find(|subject| subject.id == id) {
            Some(subject) => Ok(subject),
            None => bail!("Script refers to unknown subject {}", id),
        }
    }
}

/// What one gesture produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum StepReport {
    Markers {
        diff: MarkerDiff,
    },
    Menu {
        target: ContextTarget,
        gate: MenuGate,
        entries: Vec<MenuEntry>,
        /// `[left, top, right, bottom]`
        placement: Option<[f32; 4]>,
    },
    Submenu {
        entries: Vec<MenuEntry>,
    },
    Dispatched {
        intent: Intent,
        outcome: DispatchOutcome,
    },
    Rejected,
    Ignored,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub intents: Vec<Intent>,
    pub calls: Vec<String>,
    pub notifications: Vec<(NotifyLevel, String)>,
    pub final_selection: Selection,
}

/// In-memory host: resolves grid points against the script's events and
/// records every collaborator call.
pub struct ReplayHost {
    subjects: Vec<Subject>,
    events: RefCell<Vec<GridEvent>>,
    confirm_deletes: bool,
    toasts: Rc<ToastQueue>,
    calls: RefCell<Vec<String>>,
}

impl ReplayHost {
    fn new(script: &Script, toasts: Rc<ToastQueue>) -> Self {
        Self {
            subjects: script.subjects.clone(),
            events: RefCell::new(script.events.clone()),
            confirm_deletes: script.confirm_deletes,
            toasts,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, call: String) {
        log::debug!("Host call: {}", call);
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CellContextResolver for ReplayHost {
    type Target = GridPoint;

    fn resolve_cell_context(&self, point: &GridPoint) -> ContextTarget {
        let row = point
            .subject_id
            .and_then(|id| self.subjects.iter().find(|subject| subject.id == id))
            .cloned();
        let cell = match (point.subject_id, point.date) {
            (Some(subject_id), Some(date)) => Some(DateCell::new(subject_id, date)),
            _ => None,
        };
        let event = cell.and_then(|cell| {
            self.events
                .borrow()
                .iter()
                .find(|event| event.covers(cell.subject_id, cell.date))
                .map(GridEvent::to_event_ref)
        });

        ContextTarget { cell, row, event }
    }
}

impl Notifier for ReplayHost {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.toasts.notify(level, message);
    }
}

impl Confirmer for ReplayHost {
    async fn confirm(&self, intent: &Intent) -> bool {
        self.record(format!("confirm {}", intent.describe()));
        self.confirm_deletes
    }
}

impl ModalOpener for ReplayHost {
    fn open_create(&self, intent: &Intent) -> Result<()> {
        self.record(format!("open create: {}", intent.describe()));
        Ok(())
    }

    fn open_edit(&self, intent: &Intent) -> Result<()> {
        self.record(format!(
            "open edit: {} #{}",
            intent.describe(),
            intent.event_id.unwrap_or_default()
        ));
        Ok(())
    }

    fn open_comment(&self, intent: &Intent, existing: Option<&str>) -> Result<()> {
        self.record(format!(
            "open comment: #{} ({})",
            intent.event_id.unwrap_or_default(),
            existing.unwrap_or("no comment")
        ));
        Ok(())
    }
}

impl RecordStore for ReplayHost {
    async fn delete(&self, event_type: EventType, id: i64) -> Result<()> {
        let mut events = self.events.borrow_mut();
        let Some(index) = events
            .iter()
            .position(|event| event.id == id && event.event_type == event_type)
        else {
            bail!("{} {} does not exist", event_type, id);
        };
        events.remove(index);
        drop(events);
        self.record(format!("delete {} {}", event_type, id));
        Ok(())
    }

    async fn fetch_comment(&self, event_type: EventType, id: i64) -> Result<Option<String>> {
        self.events
            .borrow()
            .iter()
            .find(|event| event.id == id && event.event_type == event_type)
            .map(|event| event.comment.clone())
            .with_context(|| format!("{} {} does not exist", event_type, id))
    }
}

fn rect_to_array(rect: Rect) -> [f32; 4] {
    [rect.left(), rect.top(), rect.right(), rect.bottom()]
}

/// Run a script. `settings` apply unless the script carries its own.
pub async fn run(script: &Script, settings: EngineSettings) -> Result<ReplayReport> {
    let settings = script.settings.clone().unwrap_or(settings);
    let toasts = Rc::new(ToastQueue::new());
    let mut engine = GridEngine::new(settings, script.user.clone(), toasts.clone());
    let dispatcher = engine.dispatcher(ReplayHost::new(script, toasts.clone()));
    let fallback_date = script.today.unwrap_or_else(today);
    let [width, height] = script.viewport.unwrap_or(DEFAULT_VIEWPORT);
    let viewport = Rect::from_min_size(Pos2::ZERO, Vec2::new(width, height));

    let mut steps = Vec::with_capacity(script.gestures.len());
    let mut intents = Vec::new();

    for gesture in &script.gestures {
        let step = match gesture {
            Gesture::Select { subject_id, date } => {
                let subject = script.subject(*subject_id)?;
                StepReport::Markers {
                    diff: engine.on_primary_select(subject, *date),
                }
            }
            Gesture::SelectRow { subject_id } => {
                let subject = script.subject(*subject_id)?;
                StepReport::Markers {
                    diff: engine.on_row_select(subject),
                }
            }
            Gesture::ContextMenu {
                subject_id,
                date,
                x,
                y,
            } => {
                let point = GridPoint {
                    subject_id: *subject_id,
                    date: *date,
                };
                match engine.on_context_menu(dispatcher.host(), &point, Pos2::new(*x, *y)) {
                    Some(view) => {
                        let size = Vec2::new(
                            MENU_WIDTH,
                            MENU_ROW_HEIGHT * view.entries.len() as f32 + 8.0,
                        );
                        let placement = engine.place_menu(size, viewport).map(rect_to_array);
                        StepReport::Menu {
                            target: view.target,
                            gate: view.gate,
                            entries: view.entries,
                            placement,
                        }
                    }
                    None => StepReport::Ignored,
                }
            }
            Gesture::OpenSubmenu => StepReport::Submenu {
                entries: engine.open_create_submenu(),
            },
            Gesture::Activate { action, event_type } => {
                let command = match (action, event_type) {
                    (MenuAction::Create, Some(event_type)) => MenuCommand::CreateType(*event_type),
                    _ => MenuCommand::Action(*action),
                };
                match engine.activate_on(command, fallback_date) {
                    Some(intent) => {
                        let outcome = dispatcher.dispatch(&intent).await;
                        engine.complete(&outcome);
                        intents.push(intent.clone());
                        StepReport::Dispatched { intent, outcome }
                    }
                    None => StepReport::Rejected,
                }
            }
            Gesture::Dismiss { reason } => {
                engine.on_dismiss(*reason);
                StepReport::Dismissed
            }
            Gesture::Escape => StepReport::Markers {
                diff: engine.on_escape(),
            },
        };
        steps.push(step);
    }

    Ok(ReplayReport {
        steps,
        intents,
        calls: dispatcher.host().calls(),
        notifications: toasts.messages(),
        final_selection: engine.get_selection(),
    })
}
