use masklog::{
    cli::{diagnostics_logger, get_args, Runner},
    constants::exit_codes,
    error::default_error_handler,
};

fn main() {
    let args = get_args();
    let diagnostics = diagnostics_logger(args.diagnostics);

    // The bridge owns the facade under --via-bridge and forwards masklog's
    // own records to the diagnostics logger itself.
    let runner = if args.via_bridge {
        Runner::new(args).with_diagnostics(diagnostics)
    } else {
        let max_level = diagnostics.filter();
        if log::set_boxed_logger(Box::new(diagnostics)).is_ok() {
            log::set_max_level(max_level);
        }
        Runner::new(args)
    };

    match runner.run() {
        Ok(_) => std::process::exit(exit_codes::SUCCESS),
        Err(err) => default_error_handler(err),
    }
}
