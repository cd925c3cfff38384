use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("navscope")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("navscope")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Show debug logging on stderr")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("audit")
                .about(
                    "Fetch each site's homepage, harvest its navigation links and classify \
                them into marketing page categories.",
                )
                .arg(
                    arg!(-u --"url" <DOMAIN>)
                        .required(false)
                        .help("A single domain to audit (default: the built-in site list)")
                        .conflicts_with("sites-file"),
                )
                .arg(
                    arg!(--"js")
                        .required(false)
                        .help("Mark the --url site as needing script rendering")
                        .action(clap::ArgAction::SetTrue)
                        .requires("url"),
                )
                .arg(
                    arg!(-S --"sites-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of `domain[,js]` entries")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(--"no-render")
                        .required(false)
                        .help("Never call the rendering service, even when a key is configured")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"wait" <MS>)
                        .required(false)
                        .help("Milliseconds the rendering service waits before capturing")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("3000"),
                )
                .arg(
                    arg!(--"timeout" <SECS>)
                        .required(false)
                        .help("Static fetch timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                ),
        )
        .subcommand(
            command!("classify")
                .about("Harvest and classify navigation links from a saved HTML file")
                .arg(
                    arg!(<FILE>)
                        .required(true)
                        .help("Path to the HTML file")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-b --"base-url" <URL>)
                        .required(true)
                        .help("URL the page was served from, used to resolve relative links"),
                ),
        )
        .subcommand(
            command!("shell-check")
                .about("Report whether a saved HTML file looks like a client-rendered loading shell")
                .arg(
                    arg!(<FILE>)
                        .required(true)
                        .help("Path to the HTML file")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
