use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("verkehr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read traffic reports from the Bremen Vier traffic page")
        .arg(clap::arg!([INPUT] "URL to fetch or local HTML file"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, text)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["json", "text"]),
        )
        .arg(clap::arg!(--pretty "Pretty-print JSON output"))
        .arg(clap::arg!(--numbered "Number incidents in text output"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("20"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--signals "Show fixed on/off slots instead of the plain incident list"))
        .arg(clap::arg!(--slots <NUM> "Number of slots for --signals").default_value("14"))
        .arg(clap::arg!(-w --watch "Keep polling and print every refresh"))
        .arg(clap::arg!(--interval <SECS> "Seconds between refreshes in --watch mode").default_value("60"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "verkehr", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "verkehr", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "verkehr", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "verkehr", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
