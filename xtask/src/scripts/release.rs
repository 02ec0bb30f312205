use crate::cli::ReleaseArgs;
use color_eyre::eyre::{eyre, Result};
use duct::cmd;

pub fn release(args: &ReleaseArgs) -> Result<()> {
    validate_version(&args.version)?;

    if !args.allow_dirty {
        let status = cmd!("git", "status", "--porcelain").read()?;
        if !status.trim().is_empty() {
            return Err(eyre!(
                "Working tree is not clean. Commit or stash your changes first, or pass --allow-dirty."
            ));
        }
    }

    let tag = format!("v{}", args.version);

    let existing = cmd!("git", "tag", "--list", &tag).read()?;
    if !existing.trim().is_empty() {
        return Err(eyre!("Tag {tag} already exists"));
    }

    println!("Tagging {tag}...");
    cmd!("git", "tag", "-a", &tag, "-m", format!("Release {tag}")).run()?;

    println!("Pushing {tag}...");
    cmd!("git", "push", "origin", &tag).run()?;

    println!("✓ Release {tag} pushed");
    Ok(())
}

/// Accepts semver-shaped versions: 1.2.3 with an optional pre-release suffix.
fn validate_version(version: &str) -> Result<()> {
    let (core, _pre) = match version.split_once('-') {
        Some((core, pre)) if !pre.is_empty() => (core, Some(pre)),
        Some(_) => return Err(eyre!("Invalid version: {version}")),
        None => (version, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
        return Err(eyre!(
            "Invalid version: {version}. Expected MAJOR.MINOR.PATCH with an optional pre-release suffix."
        ));
    }
    Ok(())
}
