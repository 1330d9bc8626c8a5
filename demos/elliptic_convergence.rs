use fdstencil::bvp::*;
use fdstencil::demo_args::{ConvergenceArgs, GridKind};

mod util;

// u = cos(A x - B) on [LEFT, RIGHT],
// Neumann on the left, Dirichlet on the right.
const A: f64 = 2.8;
const B: f64 = 1.1;
const LEFT: f64 = -1.8;
const RIGHT: f64 = 2.1;

fn sol(x: f64) -> f64 {
    (A * x - B).cos()
}

fn d_sol(x: f64) -> f64 {
    -A * (A * x - B).sin()
}

fn d2_sol(x: f64) -> f64 {
    -A * A * (A * x - B).cos()
}

fn main() {
    util::init_logging();
    let args = ConvergenceArgs::cli_setup("elliptic_convergence");
    if args.norms {
        inverse_norms(&args);
    } else {
        errors(&args);
    }
    args.common.finish();
}

/// Stability: 2- and inf-norms of the inverse matrix as `n` grows.
fn inverse_norms(args: &ConvergenceArgs) {
    let width = args.width.unwrap_or(3);
    let ends = [
        ("dirichlet", Boundary::Dirichlet(0.0)),
        ("neumann", Boundary::Neumann(0.0)),
    ];

    print!("{:>6}", "n");
    for (name, _) in &ends {
        print!(" {:>14} {:>14}", format!("{name} 2"), format!("{name} inf"));
    }
    println!();

    for n in args.sizes() {
        profiling::scope!("elliptic_convergence: inverse norms");
        print!("{:>6}", n);
        for (_, left) in &ends {
            let problem = TwoPointProblem::new(*left, Boundary::Dirichlet(0.0))
                .with_width(width);
            let norms = GridKind::Uniform
                .generate(0.0, 1.0, n)
                .and_then(|x| problem.inverse_norms(&x));
            match norms {
                Ok(norms) => {
                    print!(" {:>14.6e} {:>14.6e}", norms.two, norms.infinity)
                }
                Err(e) => {
                    tracing::warn!(n, ?left, "inverse failed: {e}");
                    print!(" {:>14} {:>14}", "-", "-");
                }
            }
        }
        println!();
        profiling::finish_frame!();
    }
}

/// Max error against the exact solution on each grid kind.
fn errors(args: &ConvergenceArgs) {
    let mut problem = TwoPointProblem::new(
        Boundary::Neumann(d_sol(LEFT)),
        Boundary::Dirichlet(sol(RIGHT)),
    );
    problem.width = args.width;

    print!("{:>6}", "n");
    for kind in &args.grids {
        print!(" {:>14}", format!("{:?}", kind).to_lowercase());
    }
    println!();

    for n in args.sizes() {
        profiling::scope!("elliptic_convergence: grid size");
        print!("{:>6}", n);
        for kind in &args.grids {
            let error = kind
                .generate(LEFT, RIGHT, n)
                .and_then(|x| {
                    let u = problem.solve(&x, d2_sol)?;
                    let exact: Vec<f64> = x.iter().map(|p| sol(*p)).collect();
                    Ok(util::max_abs_diff(u.as_slice(), &exact))
                });
            match error {
                Ok(e) => print!(" {:>14.6e}", e),
                Err(e) => {
                    tracing::warn!(n, ?kind, "solve failed: {e}");
                    print!(" {:>14}", "-");
                }
            }
        }
        println!();
        profiling::finish_frame!();
    }
}
