//! Top-level checkout controller.
//!
//! Owns the selected method, the error list and the mounted method widgets,
//! and wires the method registry, content projection, translation propagator
//! and submission controller together. Rendering is left to the host; the
//! orchestrator only exposes a [`CheckoutView`] snapshot of what to show.

use crate::config::WidgetConfig;
use crate::content::{ContentNode, HostContent};
use crate::error::CheckoutError;
use crate::i18n::{Locale, Overrides, TranslationContext, TranslationPropagator};
use crate::methods::{MethodDescriptor, MethodRegistry};
use crate::prepare::PrepareHandler;
use crate::projection::ContentProjection;
use crate::remote::RemoteConfigClient;
use crate::submission::{Navigator, SubmissionController, SubmissionPhase};
use crate::types::PaymentMethodType;
use crate::widgets::PaymentMethodWidget;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info, warn};

/// Where a method-change signal originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorSource {
    /// The orchestrator's built-in selector
    Own,
    /// A selector nested inside some other content
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodChange {
    pub source: SelectorSource,
    pub value: String,
}

impl MethodChange {
    pub fn own(value: impl Into<String>) -> Self {
        Self {
            source: SelectorSource::Own,
            value: value.into(),
        }
    }
}

/// Element a click inside the submit region landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    /// The built-in submit button
    NativeButton,
    /// A button supplied by the host through the submit slot
    CustomButton,
    /// Anything else inside the region
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitIntent {
    pub target: SubmitTarget,
}

impl SubmitIntent {
    pub fn native() -> Self {
        Self {
            target: SubmitTarget::NativeButton,
        }
    }

    /// Classify a click on host content projected into the submit slot.
    pub fn from_host_node(node: &ContentNode) -> Self {
        let target = match node {
            ContentNode::Element { tag, .. } if is_button_tag(tag) => SubmitTarget::CustomButton,
            _ => SubmitTarget::Other,
        };
        Self { target }
    }
}

fn is_button_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("button") || tag.eq_ignore_ascii_case("checkout-button")
}

/// Outcome of one submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Redirected(String),
    Failed(Vec<String>),
    /// A submission was already in flight
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Error(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOption {
    pub method: PaymentMethodType,
    pub label: String,
    pub slot_name: &'static str,
    /// The host supplied its own label through `slot_name`
    pub label_overridden: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorView {
    /// The host owns the selection UI
    Custom,
    /// Exactly one method is available; shown as a plain label
    Single(MethodOption),
    Choices(Vec<MethodOption>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub method: PaymentMethodType,
    pub form_region: &'static str,
    pub forwarded_slots: Vec<String>,
}

/// Snapshot of everything the host needs to render the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    pub selector: SelectorView,
    /// Standalone forms region, shown only alongside a custom selector
    pub forms_visible: bool,
    pub active_form: Option<FormView>,
    pub no_method_message: Option<String>,
    pub errors: Vec<String>,
    pub submit_label: String,
    pub loading: bool,
}

struct OrchestratorState {
    selected: PaymentMethodType,
    content: HostContent,
    has_custom_selector: bool,
    translation: TranslationContext,
    prepare: Option<Arc<dyn PrepareHandler>>,
    errors: Vec<String>,
    // Widgets stay mounted once built so their field state survives
    // selection changes.
    widgets: BTreeMap<PaymentMethodType, Arc<dyn PaymentMethodWidget>>,
}

pub struct PaymentOrchestrator {
    registry: &'static MethodRegistry,
    controller: SubmissionController,
    propagator: TranslationPropagator,
    state: RwLock<OrchestratorState>,
}

impl PaymentOrchestrator {
    /// Validate `config`, resolve the API host and mount the default method.
    pub fn connect(
        config: WidgetConfig,
        content: HostContent,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, CheckoutError> {
        let has_key = config
            .public_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(CheckoutError::config("public-key is required"));
        }

        if config.config_fetch_retry.max_attempts == 0 {
            return Err(CheckoutError::config(
                "Config fetch retry must allow at least one attempt",
            ));
        }

        let api_host = config.resolved_api_host()?;
        let remote = RemoteConfigClient::new(
            reqwest::Client::new(),
            api_host,
            config.config_fetch_retry.clone(),
        );

        let translation = TranslationContext::new(config.locale, config.translations.clone());
        let propagator = TranslationPropagator::new(translation.translator().clone());
        let scanned = propagator.scan_and_register(&content);
        let has_custom_selector = ContentProjection::new(&content).has_custom_method_selector();

        let orchestrator = Self {
            registry: MethodRegistry::global(),
            controller: SubmissionController::new(remote, navigator),
            propagator,
            state: RwLock::new(OrchestratorState {
                selected: config.default_method,
                content,
                has_custom_selector,
                translation,
                prepare: None,
                errors: Vec::new(),
                widgets: BTreeMap::new(),
            }),
        };
        orchestrator.mount_selected(&mut orchestrator.write());

        info!(
            "Checkout connected (api host: {}, method: {}, locale: {}, {} leaves)",
            orchestrator.controller.api_host(),
            config.default_method,
            config.locale,
            scanned
        );
        Ok(orchestrator)
    }

    fn read(&self) -> RwLockReadGuard<'_, OrchestratorState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrchestratorState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Build the selected method's widget if needed and project into it.
    fn mount_selected(&self, state: &mut OrchestratorState) {
        let Some(descriptor) = self.registry.find(state.selected) else {
            warn!("No enabled payment method '{}'", state.selected);
            return;
        };

        let widget = state
            .widgets
            .entry(descriptor.method)
            .or_insert_with(|| {
                debug!("Mounting widget for {}", descriptor.method);
                descriptor.build_widget()
            })
            .clone();
        widget.project(ContentProjection::new(&state.content).forward(descriptor));
    }

    fn reproject_all(&self, state: &OrchestratorState) {
        let projection = ContentProjection::new(&state.content);
        for (method, widget) in &state.widgets {
            if let Some(descriptor) = self.registry.find(*method) {
                widget.project(projection.forward(descriptor));
            }
        }
    }

    // ==================== Selection ====================

    /// Select a method on behalf of the host. Unknown or disabled methods
    /// are ignored.
    pub fn select_method(&self, method: PaymentMethodType) -> bool {
        if self.registry.find(method).is_none() {
            warn!("Ignoring selection of unavailable method '{}'", method);
            return false;
        }

        let mut state = self.write();
        state.selected = method;
        state.errors.clear();
        self.mount_selected(&mut state);
        debug!("Selected payment method: {}", method);
        true
    }

    /// Handle a change signal from a method selector.
    ///
    /// Only signals raised by the orchestrator's own selector are accepted.
    pub fn on_method_change(&self, change: &MethodChange) -> bool {
        if change.source != SelectorSource::Own {
            debug!("Ignoring method change from nested selector");
            return false;
        }

        match self.registry.find_by_id(&change.value) {
            Some(descriptor) => self.select_method(descriptor.method),
            None => {
                warn!("Ignoring unknown payment method id '{}'", change.value);
                false
            }
        }
    }

    // ==================== Content ====================

    /// Replace the host content, keeping leaf registrations and projections
    /// in step with it.
    pub fn set_content(&self, content: HostContent) {
        let mut state = self.write();

        let current: HashSet<_> = content.translatable_leaves().iter().map(|l| l.id()).collect();
        for leaf in state.content.translatable_leaves() {
            if !current.contains(&leaf.id()) {
                self.propagator.unregister(&leaf);
            }
        }
        for leaf in content.translatable_leaves() {
            self.propagator.register(&leaf);
        }

        let has_custom_selector = ContentProjection::new(&content).has_custom_method_selector();
        if has_custom_selector != state.has_custom_selector {
            debug!("Custom method selector present: {}", has_custom_selector);
        }
        state.has_custom_selector = has_custom_selector;
        state.content = content;

        self.mount_selected(&mut state);
        self.reproject_all(&state);
    }

    // ==================== Translation ====================

    pub fn set_locale(&self, locale: Locale) {
        let mut state = self.write();
        let overrides = state.translation.overrides().cloned();
        self.retranslate(&mut state, TranslationContext::new(locale, overrides));
    }

    pub fn set_translations(&self, overrides: Option<Overrides>) {
        let mut state = self.write();
        let locale = state.translation.locale();
        self.retranslate(&mut state, TranslationContext::new(locale, overrides));
    }

    fn retranslate(&self, state: &mut OrchestratorState, translation: TranslationContext) {
        debug!("Translation context changed (locale: {})", translation.locale());
        self.propagator.update(translation.translator().clone());
        state.translation = translation;
    }

    // ==================== Submission ====================

    pub fn set_prepare(&self, prepare: Arc<dyn PrepareHandler>) {
        self.write().prepare = Some(prepare);
    }

    /// Submit when the click reached a submit button. Returns `None` for
    /// clicks on anything else.
    pub async fn on_submit_intent(&self, intent: SubmitIntent) -> Option<SubmitOutcome> {
        match intent.target {
            SubmitTarget::NativeButton | SubmitTarget::CustomButton => Some(self.submit().await),
            SubmitTarget::Other => None,
        }
    }

    /// Run one submit attempt.
    ///
    /// On success the navigator has already been handed the redirect URL.
    /// On failure `errors` holds at least one message.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(guard) = self.controller.begin() else {
            debug!("Submission already in flight, ignoring intent");
            return SubmitOutcome::Ignored;
        };

        let (widget, translator, prepare) = {
            let mut state = self.write();
            let Some(prepare) = state.prepare.clone() else {
                warn!("Submit attempted without a prepare callback");
                state.errors = vec!["Missing prepare callback".to_string()];
                return SubmitOutcome::Failed(state.errors.clone());
            };
            state.errors.clear();
            let widget = self
                .registry
                .find(state.selected)
                .and_then(|d| state.widgets.get(&d.method).cloned());
            (widget, state.translation.translator().clone(), prepare)
        };

        let result = guard.run(widget, &translator, prepare.as_ref()).await;
        drop(guard);

        match result {
            Ok(url) => SubmitOutcome::Redirected(url),
            Err(e) => {
                error!("Submission failed: {}", e);
                let messages = e.messages();
                self.write().errors = messages.clone();
                SubmitOutcome::Failed(messages)
            }
        }
    }

    // ==================== Accessors ====================

    pub fn selected_method(&self) -> PaymentMethodType {
        self.read().selected
    }

    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    pub fn submission_phase(&self) -> SubmissionPhase {
        self.controller.phase()
    }

    pub fn errors(&self) -> Vec<String> {
        self.read().errors.clone()
    }

    pub fn submission_state(&self) -> SubmissionState {
        if self.is_submitting() {
            return SubmissionState::Submitting;
        }
        let state = self.read();
        if state.errors.is_empty() {
            SubmissionState::Idle
        } else {
            SubmissionState::Error(state.errors.clone())
        }
    }

    pub fn has_custom_selector(&self) -> bool {
        self.read().has_custom_selector
    }

    pub fn translation_context(&self) -> TranslationContext {
        self.read().translation.clone()
    }

    /// Registration point for leaves created after connect.
    pub fn propagator(&self) -> &TranslationPropagator {
        &self.propagator
    }

    /// Widget of the selected method, if that method is available.
    pub fn active_widget(&self) -> Option<Arc<dyn PaymentMethodWidget>> {
        let state = self.read();
        self.registry
            .find(state.selected)
            .and_then(|d| state.widgets.get(&d.method).cloned())
    }

    /// Methods whose widgets have been mounted.
    pub fn mounted_methods(&self) -> Vec<PaymentMethodType> {
        self.read().widgets.keys().copied().collect()
    }

    pub fn view(&self) -> CheckoutView {
        let state = self.read();
        let t = state.translation.translator();
        let projection = ContentProjection::new(&state.content);

        let option = |d: &MethodDescriptor| MethodOption {
            method: d.method,
            label: t.translate(d.display_key),
            slot_name: d.slot_name,
            label_overridden: projection.has_external_content(d.slot_name),
            selected: d.method == state.selected,
        };

        let methods = self.registry.list();
        let selector = if state.has_custom_selector {
            SelectorView::Custom
        } else if let [only] = methods.as_slice() {
            SelectorView::Single(option(*only))
        } else {
            SelectorView::Choices(methods.iter().map(|d| option(*d)).collect())
        };

        let active = self.registry.find(state.selected);
        let active_form = active.map(|d| FormView {
            method: d.method,
            form_region: d.form_region,
            forwarded_slots: projection
                .forwardable_slots(d)
                .into_iter()
                .map(str::to_string)
                .collect(),
        });
        let no_method_message = match active {
            Some(_) => None,
            None => Some(t.translate("payment.errors.noMethod")),
        };

        CheckoutView {
            selector,
            forms_visible: state.has_custom_selector,
            active_form,
            no_method_message,
            errors: state.errors.clone(),
            submit_label: t.translate("payment.submit"),
            loading: self.controller.is_submitting(),
        }
    }

    /// Tear down: every registered leaf is released.
    pub fn disconnect(&self) {
        debug!("Checkout disconnected, releasing {} leaves", self.propagator.len());
        self.propagator.clear();
    }
}
