//! Tab-separated report rendering.
//!
//! Every writer takes an explicit sink so output is testable without
//! capturing process-wide state; `main` passes a locked stdout. Missing
//! fields render as the fixed [`MISSING`] token rather than an empty
//! string (or a zero, which would be indistinguishable from a legitimate
//! count of zero).

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use roster::Collection;

/// Placeholder for fields the API did not populate.
pub const MISSING: &str = "N/A";

/// Which columns a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Projection {
    /// All profile columns.
    Full,
    /// Actor ids only.
    Ids,
    /// Actor id and email.
    Emails,
}

fn unify_str(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => MISSING,
    }
}

fn unify_int(value: Option<u32>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn unify_date(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Write a report in the requested projection.
pub fn write_report<W: Write>(
    mut w: W,
    prefix: Option<(&str, &str)>,
    collection: &Collection,
    projection: Projection,
) -> io::Result<()> {
    match projection {
        Projection::Full => write_actors(&mut w, prefix, collection),
        Projection::Ids => write_actor_ids(&mut w, collection),
        Projection::Emails => write_contacts(&mut w, prefix, collection),
    }
}

/// One full row per actor: optional `owner/repo` prefix, id, login, name,
/// email, location, company, blog, bio, public-repo count, following,
/// followers, profile URL, and a trailing event timestamp when the
/// collection carries one.
pub fn write_actors<W: Write>(
    w: &mut W,
    prefix: Option<(&str, &str)>,
    collection: &Collection,
) -> io::Result<()> {
    for (i, actor) in collection.actors.iter().enumerate() {
        if let Some((owner, repo)) = prefix {
            write!(w, "{owner}/{repo}\t")?;
        }

        write!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            actor.id,
            unify_str(actor.login.as_deref()),
            unify_str(actor.name.as_deref()),
            unify_str(actor.email.as_deref()),
            unify_str(actor.location.as_deref()),
            unify_str(actor.company.as_deref()),
            unify_str(actor.blog.as_deref()),
            unify_str(actor.bio.as_deref()),
            unify_int(actor.public_repos),
            unify_int(actor.following),
            unify_int(actor.followers),
            unify_str(actor.html_url.as_deref()),
        )?;

        if collection.is_timestamped() {
            write!(w, "\t{}", unify_date(collection.times[i]))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Id-only rows, with the event timestamp when tracked.
pub fn write_actor_ids<W: Write>(w: &mut W, collection: &Collection) -> io::Result<()> {
    for (i, actor) in collection.actors.iter().enumerate() {
        write!(w, "{}", actor.id)?;
        if collection.is_timestamped() {
            write!(w, "\t{}", unify_date(collection.times[i]))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Id and email rows, for contact exports.
pub fn write_contacts<W: Write>(
    w: &mut W,
    prefix: Option<(&str, &str)>,
    collection: &Collection,
) -> io::Result<()> {
    for actor in &collection.actors {
        if let Some((owner, repo)) = prefix {
            write!(w, "{owner}/{repo}\t")?;
        }
        writeln!(w, "{}\t{}", actor.id, unify_str(actor.email.as_deref()))?;
    }

    Ok(())
}

/// Repository names, one per line.
pub fn write_repo_names<W: Write>(w: &mut W, names: &[String]) -> io::Result<()> {
    for name in names {
        writeln!(w, "{name}")?;
    }

    Ok(())
}
