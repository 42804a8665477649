use std::io::Write;
use std::process::Command;
use anyhow::{bail, Result};
use colored::Colorize;
use cnest::cleanup::OwnerPermissions;
use cnest::fetch::GitFetcher;
use cnest::install::{install, InstallConfig, InstallOutcome, InstallRequest};
use cnest::manifest::ProjectManifest;
use crate::cli::{CnestCommand, CLI};

pub fn execute(cli: CLI) -> Result<()> {
    if cli.command != CnestCommand::Init {
        let manifest_path = std::env::current_dir()?.join("cnest.toml");
        if !manifest_path.exists() {
            bail!("cnest.toml not found. Run `cnest init` to create one.")
        }
    }
    match cli.command {
        CnestCommand::Init => {
            execute_init()
        }
        CnestCommand::Install { package, revision } => {
            execute_install(package, revision)
        }
        CnestCommand::List => {
            execute_list()
        }
        CnestCommand::Build => {
            execute_build()
        }
        CnestCommand::Run { args } => {
            execute_run(args)
        }
    }
}

fn prompt(message: &str, default: &str) -> Result<String> {
    print!("{} [{}]: ", message, default);
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let input = input.trim();
    Ok(if input.is_empty() {
        default.to_string()
    } else {
        input.to_string()
    })
}

pub fn execute_init() -> Result<()> {
    let cwd = std::env::current_dir()?;
    if cwd.join("cnest.toml").exists() {
        println!("cnest.toml already exists in the current directory.");
        return Ok(());
    }
    println!("Initializing cnest.toml and CMake project...");
    let dir_name = cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my-package")
        .to_string();
    let name = prompt("Enter project name", &dir_name)?;
    let version = prompt("Enter project version", "1.0.0")?;
    let author = prompt("Enter author name", "Anonymous")?;
    let license = prompt("Enter license type", "MIT")?;
    let description = prompt("Enter project description", "A C++ project")?;

    let manifest = ProjectManifest::new(&name, &version, &author, &license, &description);
    manifest.save(cwd.join("cnest.toml"))?;

    std::fs::create_dir_all(cwd.join("src"))?;
    std::fs::create_dir_all(cwd.join("include"))?;
    std::fs::write(
        cwd.join("src").join("main.cpp"),
        "#include <iostream>\n\nint main() {\n    std::cout << \"Hello, World!\" << std::endl;\n    return 0;\n}\n",
    )?;
    std::fs::write(
        cwd.join("CMakeLists.txt"),
        format!(
            "cmake_minimum_required(VERSION 3.10)\nproject({name} VERSION {version})\n\nset(CMAKE_CXX_STANDARD 17)\n\ninclude_directories(include)\nadd_executable({name} src/main.cpp)\n"
        ),
    )?;

    println!("{} cnest.toml, src/main.cpp, include/, CMakeLists.txt", "Created".green());
    Ok(())
}

pub fn execute_install(package: String, revision: Option<String>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = InstallConfig::for_project(&cwd);
    let request = InstallRequest { package, revision };
    match install(&config, &GitFetcher, &OwnerPermissions, &request)? {
        InstallOutcome::Installed { revision } => {
            println!("{} {} ({})", "Installed".green(), request.package, revision);
        }
        InstallOutcome::AlreadyInstalled { revision } => {
            println!(
                "{} is already installed with revision {}.",
                request.package, revision
            );
        }
    }
    Ok(())
}

pub fn execute_list() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = ProjectManifest::load(cwd.join("cnest.toml"))?;
    if manifest.dependencies.is_empty() {
        println!("No dependencies");
        return Ok(());
    }
    println!("Dependencies:");
    for (name, revision) in &manifest.dependencies {
        println!("  - {}: {}", name, revision);
    }
    Ok(())
}

fn run_command(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program).args(args).status()?;
    if !status.success() {
        bail!("{} {} failed with status {}", program, args.join(" "), status);
    }
    Ok(())
}

pub fn execute_build() -> Result<()> {
    println!("Building the project...");
    std::fs::create_dir_all("build")?;
    run_command("cmake", &["-S", ".", "-B", "build"])?;
    run_command("cmake", &["--build", "build"])?;
    println!("{} The binaries are in the 'build/' directory.", "Build completed.".green());
    Ok(())
}

pub fn execute_run(args: Vec<String>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = ProjectManifest::load(cwd.join("cnest.toml"))?;
    let binary = cwd.join("build").join(&manifest.project.name);
    if !binary.exists() {
        bail!("{} not found. Run `cnest build` first.", binary.display());
    }
    let output = Command::new(binary).args(args).output()?;
    if !output.status.success() {
        bail!("{}", String::from_utf8_lossy(&output.stderr));
    }
    print!("{}", String::from_utf8_lossy(&output.stdout));
    Ok(())
}
