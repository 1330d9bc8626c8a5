use crate::build_info;
use crate::error::*;
use crate::grid;
use clap::{Args, Parser, ValueEnum};

#[cfg(feature = "profile-with-puffin")]
use std::sync::{LazyLock, Mutex};

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: LazyLock<Mutex<Option<puffin_http::Server>>> =
    LazyLock::new(|| {
        println!("Initializing profiling server:");
        let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        println!(
            "Run this to view profiling data:  puffin_viewer {server_addr}"
        );
        let server = puffin_http::Server::new(&server_addr)
            .expect("Couldn't start puffin server");
        Mutex::new(Some(server))
    });

#[derive(Copy, Clone, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum GridKind {
    #[default]
    Uniform,
    Chebyshev,
}

impl GridKind {
    pub fn generate(&self, a: f64, b: f64, n: usize) -> Result<Vec<f64>> {
        match self {
            GridKind::Uniform => grid::uniform(a, b, n),
            GridKind::Chebyshev => grid::chebyshev(a, b, n),
        }
    }
}

/// Options shared by every demo.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    pub threads: usize,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl CommonArgs {
    pub fn setup(&self, name: &str) {
        if self.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        println!("DEMO: {}", name);
        println!("GIT DESCRIBE: {}", env!("GIT_DESCRIBE"));

        #[cfg(feature = "profile-with-puffin")]
        {
            let server_lock = PUFFIN_SERVER.lock().expect("puffin lock");
            if let Some(server) = server_lock.as_ref() {
                std::thread::sleep(std::time::Duration::from_secs(2));
                profiling::puffin::set_scopes_on(true);
                profiling::finish_frame!();
                println!("t: {}", server.num_clients());
            }
        }

        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()
            .expect("Couldn't build thread pool");
    }

    pub fn finish(&self) {
        #[cfg(feature = "profile-with-puffin")]
        {
            println!("Flusing profiler");
            profiling::finish_frame!();
            if let Ok(mut server) = PUFFIN_SERVER.lock() {
                server.take();
            }
        }
    }
}

/// Finite difference weights for one stencil,
/// computed by recursion and by the Vandermonde solve.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct WeightsArgs {
    /// Derivative order.
    #[arg(short = 'k', long, default_value = "1")]
    pub order: usize,

    /// Where to approximate the derivative.
    #[arg(short = 'z', long, default_value = "0.0", allow_hyphen_values = true)]
    pub at: f64,

    /// Sample locations.
    #[arg(
        short = 'x',
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = [0.0, 0.3]
    )]
    pub points: Vec<f64>,

    /// Print every derivative order up to `order`.
    #[arg(long)]
    pub table: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WeightsArgs {
    pub fn cli_setup(name: &str) -> Self {
        let args = WeightsArgs::parse();
        args.common.setup(name);
        args
    }
}

/// Max error of `u'' = f` solves as the grid is refined.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ConvergenceArgs {
    /// Smallest number of grid points.
    #[arg(long, default_value = "5")]
    pub min_points: usize,

    /// Largest number of grid points.
    #[arg(long, default_value = "45")]
    pub max_points: usize,

    /// Increment between grid sizes.
    #[arg(long, default_value = "5")]
    pub step: usize,

    /// Stencil width per row, the whole grid if unset.
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Grids to compare.
    #[arg(
        short,
        long,
        value_enum,
        num_args = 1..,
        default_values_t = [GridKind::Uniform, GridKind::Chebyshev]
    )]
    pub grids: Vec<GridKind>,

    /// Print norms of the inverse system matrix on uniform grids over
    /// [0, 1] instead of solve errors. Width defaults to 3.
    #[arg(long)]
    pub norms: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ConvergenceArgs {
    pub fn cli_setup(name: &str) -> Self {
        let args = ConvergenceArgs::parse();
        args.common.setup(name);
        args
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.min_points..=self.max_points).step_by(self.step.max(1))
    }
}
