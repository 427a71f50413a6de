use clap::arg;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("page-loader")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Downloads a web page and its local assets for offline viewing")
        .bin_name("page-loader")
        .styles(CLAP_STYLING)
        .arg(arg!(<URL>).help("The page to download"))
        .arg(
            arg!(-o --"output" <DIR>)
                .required(false)
                .help("Output directory (must already exist)")
                .default_value("."),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Output format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(arg!(-q --"quiet" "Hide download progress").required(false))
        .arg(arg!(-v --"verbose" ... "Increase log verbosity (-v info, -vv debug)").required(false))
}
