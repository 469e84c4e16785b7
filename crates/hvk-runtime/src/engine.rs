use crate::SourceSet;
use anyhow::Result;
use hvk_audit::{EpisodeKind, EpisodeLog};
use hvk_config::{PrivilegeSignals, TamperPolicy};
use hvk_effects::{EffectStack, LockScreen, NetworkGate, PageHost};
use hvk_lockdown::{
    evaluate, ControllerState, Decision, EffectCommand, EngineState, LockdownConfig, ReasonCode,
    RecoveryPolicy, TickInput,
};
use hvk_signals::{MutationRecord, PageEnv, SourceId};
use hvk_suspicion::{AggregationMode, Aggregator};
use uuid::Uuid;

/// The per-page-load tamper engine: probes, aggregator, controller and
/// effect execution wired together behind one `advance` entry point.
///
/// Host integration surface:
/// - call [`TamperEngine::start`] once at page init;
/// - call [`advance`] on every host timer tick with the monotonic clock;
/// - forward `keydown` / `contextmenu` / `selectstart` / `resize` / mutation
///   events to the `on_*` hooks and honor their suppression verdicts.
///
/// [`advance`]: TamperEngine::advance
pub struct TamperEngine {
    policy: TamperPolicy,
    fingerprint: String,
    page_load_id: Uuid,

    sources: SourceSet,
    aggregator: Aggregator,

    lockdown_cfg: LockdownConfig,
    controller: ControllerState,

    effects: EffectStack,
    gate: NetworkGate,
    screen: LockScreen,

    audit: Option<EpisodeLog>,

    /// A reserved chord fired since the last evaluation tick.
    pending_key_trigger: bool,
    next_eval_ms: u64,
}

impl TamperEngine {
    /// Build the engine for this page load, or `None` for privileged users
    /// (the gate disables detection entirely; no probes, no timers).
    pub fn start(
        policy: TamperPolicy,
        privilege: &PrivilegeSignals,
        env: &dyn PageEnv,
    ) -> Result<Option<Self>> {
        policy.validate()?;

        if privilege.is_privileged() {
            tracing::info!("privileged session, tamper engine disabled");
            return Ok(None);
        }

        let fingerprint = hvk_config::policy_fingerprint(&policy)?;
        let sources = SourceSet::from_policy(&policy.sources);

        // One-time capability report; degraded probes stay enabled and emit
        // clear signals, this is purely diagnostic.
        if policy.sources.size_delta.enabled && env.window_metrics().is_none() {
            tracing::warn!("window metrics unavailable, size-delta probe degraded");
        }
        if policy.sources.mutation.enabled && !env.mutation_observer_supported() {
            tracing::warn!("mutation observer unsupported, mutation probe degraded");
        }
        if sources.is_empty() {
            tracing::warn!("all signal sources disabled by policy");
        }

        let aggregator = Aggregator::new(aggregation_mode(&policy), policy.sample_window_ms);
        let lockdown_cfg = lockdown_config(&policy);

        let audit = match &policy.audit.path {
            Some(path) => Some(EpisodeLog::new(path, policy.audit.hash_chain)?),
            None => None,
        };

        let gate = NetworkGate::new();
        let screen = LockScreen::new(
            policy.lock_screen.title.clone(),
            policy.lock_screen.message.clone(),
            policy.lock_screen.contact.clone(),
        );

        tracing::info!(fingerprint = %fingerprint, "tamper engine started");

        Ok(Some(Self {
            policy,
            fingerprint,
            page_load_id: Uuid::new_v4(),
            sources,
            aggregator,
            lockdown_cfg,
            controller: ControllerState::new(),
            effects: EffectStack::new(gate.clone()),
            gate,
            screen,
            audit,
            pending_key_trigger: false,
            next_eval_ms: 0,
        }))
    }

    /// One host timer tick. Samples whichever probes are due, and at the
    /// evaluation cadence aggregates, runs the controller, and executes any
    /// commanded effect. Returns the controller decision on evaluation
    /// ticks, `None` in between.
    pub fn advance(
        &mut self,
        now_ms: u64,
        env: &mut dyn PageEnv,
        host: &mut dyn PageHost,
    ) -> Result<Option<Decision>> {
        self.sources.sample_due(env, now_ms);

        if now_ms < self.next_eval_ms {
            return Ok(None);
        }
        self.next_eval_ms = now_ms.saturating_add(self.policy.tick_interval_ms);

        let readings = self.sources.current(now_ms);
        let sample = self.aggregator.aggregate(&readings, now_ms);

        let input = TickInput {
            now_ms,
            score: sample.score,
            key_trigger: std::mem::take(&mut self.pending_key_trigger),
        };
        let decision = evaluate(&self.lockdown_cfg, &mut self.controller, &input);

        match decision.command {
            Some(EffectCommand::ApplyLockdown) => {
                tracing::warn!(
                    reason = reason_str(decision.reason),
                    score = sample.score,
                    at_ms = now_ms,
                    "lockdown engaged"
                );
                self.effects.apply(host, &self.screen);
                self.append_episode(EpisodeKind::Locked, decision.reason, sample.score, now_ms)?;
            }
            Some(EffectCommand::RequestReload) => {
                tracing::info!(at_ms = now_ms, "calm recovery, requesting reload");
                host.request_reload();
                self.append_episode(
                    EpisodeKind::ReloadRequested,
                    decision.reason,
                    sample.score,
                    now_ms,
                )?;
            }
            None => {}
        }

        Ok(Some(decision))
    }

    /// Host `keydown` hook. Returns `true` when the event must be suppressed
    /// (reserved chord, or any key while locked). A matched chord also arms
    /// the key trigger for the next evaluation tick.
    pub fn on_key_event(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        if self
            .policy
            .key_triggers
            .iter()
            .any(|c| c.matches(key, ctrl, shift, alt))
        {
            self.pending_key_trigger = true;
            return true;
        }
        self.controller.state.is_locked()
    }

    /// Host `contextmenu` hook: `true` = suppress. Suppression only; the
    /// right-click itself is not treated as a tamper signal.
    pub fn on_context_menu(&self) -> bool {
        self.policy.block_context_menu || self.controller.state.is_locked()
    }

    /// Host `selectstart` hook: `true` = suppress.
    pub fn on_select_start(&self) -> bool {
        self.policy.block_text_selection || self.controller.state.is_locked()
    }

    /// Host `resize` hook: forces an out-of-cadence geometry sample so a
    /// docking inspector is seen before the next poll.
    pub fn on_resize(&mut self, env: &mut dyn PageEnv, now_ms: u64) {
        self.sources.force_size_sample(env, now_ms);
    }

    /// Host mutation-observer hook.
    pub fn on_mutation(&mut self, record: &MutationRecord) {
        self.sources.observe_mutation(record);
    }

    pub fn state(&self) -> EngineState {
        self.controller.state
    }

    /// Clone of the shared network gate for the host's fetch/XHR/WebSocket
    /// wrappers.
    pub fn network_gate(&self) -> NetworkGate {
        self.gate.clone()
    }

    pub fn suspicion(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn policy_fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn page_load_id(&self) -> Uuid {
        self.page_load_id
    }

    fn append_episode(
        &mut self,
        kind: EpisodeKind,
        reason: ReasonCode,
        score: f64,
        now_ms: u64,
    ) -> Result<()> {
        if let Some(log) = self.audit.as_mut() {
            log.append(
                self.page_load_id,
                now_ms,
                kind,
                reason_str(reason),
                score,
                &self.fingerprint,
            )?;
        }
        Ok(())
    }
}

fn aggregation_mode(policy: &TamperPolicy) -> AggregationMode {
    match &policy.aggregation {
        hvk_config::AggregationPolicy::Max => AggregationMode::Max,
        hvk_config::AggregationPolicy::WeightedSum { weights } => AggregationMode::WeightedSum(
            weights
                .iter()
                // Unknown names are rejected by policy validation.
                .filter_map(|(name, w)| SourceId::from_name(name).map(|id| (id, *w)))
                .collect(),
        ),
    }
}

fn lockdown_config(policy: &TamperPolicy) -> LockdownConfig {
    LockdownConfig {
        high_threshold: policy.thresholds.high,
        low_threshold: policy.thresholds.low,
        debounce_window_ms: policy.thresholds.debounce_window_ms,
        cooldown_window_ms: policy.thresholds.cooldown_window_ms,
        recovery: match policy.recovery {
            hvk_config::RecoveryPolicyConfig::HoldUntilReload => RecoveryPolicy::HoldUntilReload,
            hvk_config::RecoveryPolicyConfig::ReloadAfterCalm { calm_ms } => {
                RecoveryPolicy::ReloadAfterCalm { calm_ms }
            }
        },
    }
}

fn reason_str(reason: ReasonCode) -> &'static str {
    match reason {
        ReasonCode::Calm => "calm",
        ReasonCode::SignalElevated => "signal_elevated",
        ReasonCode::SustainedSignal => "sustained_signal",
        ReasonCode::StrongSignal => "strong_signal",
        ReasonCode::KeyTrigger => "key_trigger",
        ReasonCode::AlreadyLocked => "already_locked",
        ReasonCode::CooledDown => "cooled_down",
        ReasonCode::ReloadRecovery => "reload_recovery",
    }
}
