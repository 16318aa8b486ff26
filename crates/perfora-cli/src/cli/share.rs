//! Share command implementation - shareable parameter strings.

use perfora::{decode_share, encode_share, Bounds};

use super::common::{self, ParamArgs};

/// Execute the share command.
///
/// Without `--decode`, the parameter flags are solved and encoded to a
/// share string on stdout. With `--decode <string>`, the string is parsed
/// and the resulting parameter set printed.
pub fn cmd_share(args: &[String]) {
    if args.first().map(String::as_str) == Some("--decode") {
        let Some(raw) = args.get(1) else {
            eprintln!("Usage: share --decode <string>");
            std::process::exit(1);
        };
        let Some(shared) = decode_share(raw, &Bounds::default()) else {
            eprintln!("Share string holds nothing recognizable: {}", raw);
            std::process::exit(1);
        };
        let flags = ParamArgs {
            params: shared.params,
            grid_locked: shared.grid_locked,
            wave: true,
        };
        let (params, state) = common::finalize(&flags);
        super::solve::print_params(&params, state, flags.wave);
        return;
    }

    let mut flags = ParamArgs::default();
    let mut i = 0;
    while i < args.len() {
        let taken = common::take_param_flag(&mut flags, args, i);
        if taken > 0 {
            i += taken;
            continue;
        }
        eprintln!("Unknown option: {}", args[i]);
        std::process::exit(1);
    }

    let (params, _state) = common::finalize(&flags);
    println!("{}", encode_share(&params));
}
