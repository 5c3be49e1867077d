//! Settings controller: the `Loading → Ready | LoadError` state machine.
//!
//! The controller owns the preset store, reacts to [`SettingsEvent`]s,
//! persists after every mutation and publishes a fresh [`DisplayState`] to
//! subscribers whenever anything visible changes.
//!
//! Everything runs on one logical thread. The defaults fetch and the
//! persisted-value read complete through the controller's own inbox, so
//! the host only has to keep pumping it.

pub mod display;
pub mod events;

pub use display::{round_half_up, DisplayRange, DisplayState};
pub use events::{SettingsEvent, UnitChangeNotification, UnitValues};

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde_json::{json, Value};
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use crate::error::{SettingsError, SettingsResult};
use crate::state::{
    is_builtin, DefaultsSource, KeyValueStore, PresetField, PresetPatch, PresetStore,
    SettingsState, SETTINGS_KEY,
};
use crate::units::UnitSystem;

/// Key written by reset-to-defaults
pub const MAX_FOV_KEY: &str = "edcMaxFov";

/// Value written by reset-to-defaults
pub const DEFAULT_MAX_FOV: u32 = 76;

/// Lifecycle phase of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for defaults and persisted settings
    Loading,
    Ready,
    /// Defaults could not be loaded; terminal
    LoadError,
}

pub struct SettingsController<S: KeyValueStore> {
    phase: Phase,
    defaults: Option<SettingsState>,
    store: Option<PresetStore>,
    units: UnitSystem,
    preset_name: String,
    display: DisplayState,
    sink: S,
    inbox: Sender<SettingsEvent>,
    events: Receiver<SettingsEvent>,
    subscribers: Vec<Sender<DisplayState>>,
}

impl<S: KeyValueStore> SettingsController<S> {
    pub fn new(sink: S, units: UnitSystem) -> Self {
        let (inbox, events) = unbounded();
        Self {
            phase: Phase::Loading,
            defaults: None,
            store: None,
            units,
            preset_name: String::new(),
            display: DisplayState::loading(units),
            sink,
            inbox,
            events,
            subscribers: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The preset store, once loaded
    pub fn store(&self) -> Option<&PresetStore> {
        self.store.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Sender for posting events into this controller
    pub fn handle(&self) -> Sender<SettingsEvent> {
        self.inbox.clone()
    }

    /// Receive a snapshot now and after every change
    pub fn subscribe(&mut self) -> Receiver<DisplayState> {
        let (tx, rx) = unbounded();
        let _ = tx.send(self.display.clone());
        self.subscribers.push(tx);
        rx
    }

    /// Start the defaults fetch on `runtime`; the outcome arrives as
    /// [`SettingsEvent::DefaultsLoaded`].
    pub fn fetch_defaults(&self, source: DefaultsSource, runtime: &Handle) {
        let inbox = self.inbox.clone();
        runtime.spawn(async move {
            let outcome = source.load().await;
            if inbox.send(SettingsEvent::DefaultsLoaded(outcome)).is_err() {
                warn!("Settings controller gone before defaults arrived");
            }
        });
    }

    /// Handle every queued event without blocking. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            handled += 1;
            if let Err(e) = self.dispatch(event) {
                warn!("Settings event rejected: {}", e);
            }
        }
        handled
    }

    /// Handle events until [`SettingsEvent::Shutdown`]
    pub fn run(&mut self) {
        while let Ok(event) = self.events.recv() {
            if matches!(event, SettingsEvent::Shutdown) {
                info!("Settings controller shutting down");
                break;
            }
            if let Err(e) = self.dispatch(event) {
                warn!("Settings event rejected: {}", e);
            }
        }
    }

    pub fn dispatch(&mut self, event: SettingsEvent) -> SettingsResult<()> {
        match event {
            SettingsEvent::DefaultsLoaded(outcome) => {
                self.on_defaults_loaded(outcome);
                Ok(())
            }
            SettingsEvent::PersistedLoaded(value) => {
                self.on_persisted_loaded(value);
                Ok(())
            }
            SettingsEvent::UnitsChanged(units) => {
                self.on_units_changed(units);
                Ok(())
            }
            SettingsEvent::UnitNotification(notification) => {
                self.on_units_changed(notification.unit_system()?);
                Ok(())
            }
            SettingsEvent::ParameterEdited { field, value } => {
                self.on_parameter_edited(field, value)
            }
            SettingsEvent::PresetSelected(name) => self.on_preset_selected(&name),
            SettingsEvent::PresetNameEdited(name) => {
                self.on_preset_name_edited(name);
                Ok(())
            }
            SettingsEvent::CreatePreset(name) => self.on_create_preset(&name),
            SettingsEvent::CreateFromNameField => {
                let name = self.preset_name.clone();
                self.on_create_preset(&name)
            }
            SettingsEvent::DeletePreset => self.on_delete_preset(),
            SettingsEvent::ResetToDefaults => {
                self.reset_to_defaults();
                Ok(())
            }
            SettingsEvent::Refresh => {
                self.refresh();
                Ok(())
            }
            SettingsEvent::Shutdown => Ok(()),
        }
    }

    /// First load boundary: shipped defaults.
    ///
    /// On success the persisted value is requested; its callback posts
    /// [`SettingsEvent::PersistedLoaded`] into the inbox.
    pub fn on_defaults_loaded(&mut self, outcome: SettingsResult<SettingsState>) {
        if self.phase != Phase::Loading || self.defaults.is_some() {
            warn!("Ignoring defaults delivered in phase {:?}", self.phase);
            return;
        }

        match outcome {
            Ok(defaults) => {
                debug!("Defaults received, reading {:?}", SETTINGS_KEY);
                self.defaults = Some(defaults);
                let inbox = self.inbox.clone();
                self.sink.read(
                    SETTINGS_KEY,
                    Box::new(move |value| {
                        if inbox.send(SettingsEvent::PersistedLoaded(value)).is_err() {
                            warn!("Settings controller gone before persisted settings arrived");
                        }
                    }),
                );
            }
            Err(e) => {
                error!(
                    "Failed to load default settings, preset settings will not work: {}",
                    e
                );
                self.phase = Phase::LoadError;
                self.refresh();
            }
        }
    }

    /// Second load boundary: persisted settings merged over the defaults.
    ///
    /// Built-ins always come from the defaults; a persisted document that
    /// does not parse is dropped.
    pub fn on_persisted_loaded(&mut self, value: Option<Value>) {
        if self.phase != Phase::Loading {
            warn!("Ignoring persisted settings delivered in phase {:?}", self.phase);
            return;
        }
        let Some(defaults) = self.defaults.take() else {
            warn!("Persisted settings arrived before defaults, ignoring");
            return;
        };

        let mut state = match value {
            Some(value) => match serde_json::from_value::<SettingsState>(value) {
                Ok(saved) => saved,
                Err(e) => {
                    warn!("Discarding unreadable persisted settings: {}", e);
                    defaults.clone()
                }
            },
            None => defaults.clone(),
        };
        state.reseed_builtins(&defaults.presets);

        info!(
            "Settings ready: {} presets, {:?} selected",
            state.presets.len(),
            state.chosen_preset
        );
        self.store = Some(PresetStore::new(state));
        self.phase = Phase::Ready;
        self.refresh();
    }

    /// Re-derive display values in the new unit; canonical data is untouched
    pub fn on_units_changed(&mut self, units: UnitSystem) {
        debug!("Display units now {} ({})", units, units.label());
        self.units = units;
        self.refresh();
    }

    /// Slider edit of one speed field, in display units
    pub fn on_parameter_edited(&mut self, field: PresetField, display_value: f64) -> SettingsResult<()> {
        if !display_value.is_finite() {
            warn!("Ignoring non-finite value for {}: {}", field, display_value);
            return Ok(());
        }
        let canonical = self.units.to_canonical(display_value);

        let store = self.ready_store()?;
        store.fork_to_custom();
        store.write_custom_fields(&PresetPatch::field(field, canonical));

        debug!("{} = {} ({} canonical)", field, display_value, canonical);
        self.refresh();
        self.persist();
        Ok(())
    }

    pub fn on_preset_selected(&mut self, name: &str) -> SettingsResult<()> {
        self.ready_store()?.set_active(name)?;
        info!("Selected preset {:?}", name);
        self.refresh();
        self.persist();
        Ok(())
    }

    /// Text typed into the new-preset name field
    pub fn on_preset_name_edited(&mut self, name: String) {
        self.preset_name = name;
        self.refresh();
    }

    /// Commit the `Custom` edits under `name`
    pub fn on_create_preset(&mut self, name: &str) -> SettingsResult<()> {
        if name.trim().is_empty() {
            return Err(SettingsError::EmptyName);
        }
        self.ready_store()?.create_named(name)?;
        self.preset_name.clear();
        self.refresh();
        self.persist();
        Ok(())
    }

    /// Delete the selected user preset and fall back to `Default`
    pub fn on_delete_preset(&mut self) -> SettingsResult<()> {
        let store = self.ready_store()?;
        if is_builtin(store.chosen_preset()) {
            return Err(SettingsError::BuiltinPreset(store.chosen_preset().to_string()));
        }
        store.delete_active()?;
        self.preset_name.clear();
        self.refresh();
        self.persist();
        Ok(())
    }

    /// Restore the host's maximum FOV setting. Not part of the preset data.
    pub fn reset_to_defaults(&self) {
        info!("Resetting {} to {}", MAX_FOV_KEY, DEFAULT_MAX_FOV);
        self.sink.write(MAX_FOV_KEY, json!(DEFAULT_MAX_FOV));
    }

    fn ready_store(&mut self) -> SettingsResult<&mut PresetStore> {
        match self.phase {
            Phase::Loading => Err(SettingsError::NotReady),
            Phase::LoadError => Err(SettingsError::Unavailable),
            Phase::Ready => self.store.as_mut().ok_or(SettingsError::NotReady),
        }
    }

    fn refresh(&mut self) {
        self.display = match (self.phase, &self.store) {
            (Phase::Ready, Some(store)) => DisplayState::derive(store, self.units, &self.preset_name),
            (Phase::LoadError, _) => DisplayState::failed(self.units),
            _ => DisplayState::loading(self.units),
        };
        self.publish();
    }

    fn publish(&mut self) {
        let display = &self.display;
        self.subscribers.retain(|tx| tx.send(display.clone()).is_ok());
    }

    /// Save the selection and every non-built-in preset
    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        match serde_json::to_value(store.state().persistable()) {
            Ok(value) => self.sink.write(SETTINGS_KEY, value),
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
    }
}
