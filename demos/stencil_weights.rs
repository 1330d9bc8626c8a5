use fdstencil::demo_args::WeightsArgs;
use fdstencil::reference::vandermonde_weights;
use fdstencil::stencil::Stencil;
use fdstencil::*;

mod util;

fn main() {
    util::init_logging();
    let args = WeightsArgs::cli_setup("stencil_weights");

    let stencil = match Stencil::new(args.order, args.at, &args.points) {
        Ok(stencil) => stencil,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    println!("order: {}", stencil.order());
    println!("at: {}", stencil.center());
    println!("points: {:?}", stencil.points());
    println!("fornberg: {:?}", stencil.weights());
    println!("accuracy order: {}", stencil.accuracy_order());

    match vandermonde_weights(args.order, args.at, &args.points) {
        Ok(reference) => {
            println!("vandermonde: {:?}", reference);
            println!(
                "max difference: {:e}",
                util::max_abs_diff(stencil.weights(), &reference)
            );
        }
        Err(e) => println!("vandermonde: {e}"),
    }

    if args.table {
        let table = compute_weight_table(args.order, args.at, &args.points);
        if let Ok(table) = table {
            for (m, column) in table.column_iter().enumerate() {
                let column: Vec<f64> = column.iter().copied().collect();
                println!("d{m}: {:?}", column);
            }
        }
    }

    args.common.finish();
}
