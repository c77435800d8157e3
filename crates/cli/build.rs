use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("chapbook")
        .version("1.0.0")
        .author("Chapbook Contributors")
        .about("Download a chaptered web novel into a XeLaTeX book")
        .arg(clap::arg!(<URL> "Index (table of contents) page of the book"))
        .arg(
            clap::arg!(-o --output_dir <DIR> "Directory receiving the master document, chapters/ and template/")
                .value_name("DIR")
                .default_value(".")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--retries <NUM> "Attempts per chapter while its content comes back empty").default_value("3"))
        .arg(
            clap::arg!(--table <TABLE> "Reserved-character table")
                .value_name("TABLE")
                .default_value("xelatex")
                .value_parser(["xelatex", "standard"]),
        )
        .arg(clap::arg!(--list "Print the table of contents as JSON and exit"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "chapbook", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "chapbook", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "chapbook", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "chapbook", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
