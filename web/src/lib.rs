use clap::{Parser, ValueEnum};
use echotango_core::{CascadeConfig, OverlapPolicy};
use wasm_bindgen::prelude::*;

mod flip;
mod grid;
mod layout;
mod page;
mod theme;
mod utils;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Overlap {
    /// Cancel whatever an earlier cascade still has pending
    Cancel,
    /// Let earlier cascades keep running; the last update to fire wins
    LastFireWins,
}

impl From<Overlap> for OverlapPolicy {
    fn from(overlap: Overlap) -> Self {
        match overlap {
            Overlap::Cancel => Self::CancelPending,
            Overlap::LastFireWins => Self::LastFireWins,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a cascade seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How a new cascade treats updates still pending from an earlier one
    #[arg(long, value_enum, default_value_t = Overlap::Cancel)]
    overlap: Overlap,
}

impl Args {
    fn cascade_config(&self) -> CascadeConfig {
        CascadeConfig::default().with_overlap(self.overlap.into())
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    theme::Theme::init();

    let props = page::PageProps {
        config: args.cascade_config(),
        seed: args.seed.unwrap_or_else(utils::js_random_seed),
    };

    let root = document()
        .get_element_by_id("app")
        .expect("Could not find id=\"app\" element");

    log::debug!("App started");
    yew::Renderer::<page::Page>::with_root_and_props(root, props).render();
}
