use core::time::Duration;
use echotango_core::{
    CascadeConfig, CellIndex, CellUpdate, Face, FlipError, FlipOrchestrator, FlipSnapshot, Scheduler,
};
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

/// Runs cascade steps on browser timers, posting each fired update to `on_fire`.
///
/// Dropping a [`Timeout`] clears it, which is how pending steps get cancelled.
pub(crate) struct TimeoutScheduler {
    on_fire: Callback<CellUpdate>,
}

impl TimeoutScheduler {
    pub(crate) fn new(on_fire: Callback<CellUpdate>) -> Self {
        Self { on_fire }
    }
}

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&mut self, delay: Duration, update: CellUpdate) -> Timeout {
        let on_fire = self.on_fire.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || on_fire.emit(update))
    }

    fn cancel(&mut self, handle: Timeout) {
        drop(handle);
    }
}

/// What the flip provider hands to its consumers.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FlipHandle {
    snapshot: FlipSnapshot,
    on_toggle: Callback<()>,
    on_set: Callback<bool>,
}

impl FlipHandle {
    pub(crate) fn is_flipped(&self) -> bool {
        self.snapshot.is_flipped()
    }

    pub(crate) fn borders_visible(&self) -> bool {
        self.snapshot.borders_visible()
    }

    /// Own state of `cell`, or the global flag before its first cascade.
    pub(crate) fn resolve(&self, cell: CellIndex) -> bool {
        self.snapshot.resolve(cell)
    }

    pub(crate) fn face(&self, cell: CellIndex) -> Face {
        Face::from_flipped(self.resolve(cell))
    }

    pub(crate) fn toggle_flip(&self) {
        self.on_toggle.emit(());
    }

    pub(crate) fn set_flipped(&self, flipped: bool) {
        self.on_set.emit(flipped);
    }
}

#[hook]
pub(crate) fn use_try_flip() -> Result<FlipHandle, FlipError> {
    use_context::<FlipHandle>().ok_or(FlipError::MissingProvider("use_flip"))
}

/// Reads the flip contract, panicking right away when no [`FlipProvider`] is mounted above the caller.
#[hook]
pub(crate) fn use_flip() -> FlipHandle {
    match use_try_flip() {
        Ok(handle) => handle,
        Err(err) => panic!("{}", err),
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct FlipProviderProps {
    #[prop_or_default]
    pub config: CascadeConfig,
    pub seed: u64,
    #[prop_or_default]
    pub children: Html,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Toggle,
    Set(bool),
    Fire(CellUpdate),
}

pub(crate) struct FlipProvider {
    orchestrator: FlipOrchestrator<TimeoutScheduler, SmallRng>,
    on_toggle: Callback<()>,
    on_set: Callback<bool>,
}

impl Component for FlipProvider {
    type Message = Msg;
    type Properties = FlipProviderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let (config, seed) = (props.config, props.seed);
        log::debug!("flip provider mounted, seed {}, {:?}", seed, config);

        let scheduler = TimeoutScheduler::new(ctx.link().callback(Msg::Fire));
        Self {
            orchestrator: FlipOrchestrator::new(config, scheduler, SmallRng::seed_from_u64(seed)),
            on_toggle: ctx.link().callback(|()| Msg::Toggle),
            on_set: ctx.link().callback(Msg::Set),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Toggle => {
                self.orchestrator.toggle_flip();
                true
            }
            Set(flipped) => {
                self.orchestrator.set_flipped(flipped);
                true
            }
            Fire(update) => self.orchestrator.fire(update).has_update(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let context = FlipHandle {
            snapshot: self.orchestrator.snapshot(),
            on_toggle: self.on_toggle.clone(),
            on_set: self.on_set.clone(),
        };

        html! {
            <ContextProvider<FlipHandle> {context}>
                { ctx.props().children.clone() }
            </ContextProvider<FlipHandle>>
        }
    }
}
