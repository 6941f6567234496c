//! Render name canonicalisation.
//!
//! Template engines hand back names such as `mypack/templates/job.nomad.tpl`.
//! Before display (and before the name is used as an output-relative path)
//! the `templates/` segment and the template suffix are dropped, giving
//! `mypack/job.nomad`.

/// Suffix carried by every pack template file.
pub const TEMPLATE_SUFFIX: &str = ".tpl";

const TEMPLATES_SEGMENT: &str = "/templates/";

/// How the template suffix is removed from a render name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameStyle {
    /// Strip exactly one trailing `.tpl`.
    #[default]
    TrimSuffix,
    /// Strip every trailing `.`, `t`, `p` or `l` character.
    ///
    /// Matches the output names produced by older pack tooling, which
    /// trimmed a character class rather than a suffix: `util.tpl` becomes
    /// `uti`. Only useful when existing output trees must keep their names.
    Legacy,
}

/// Canonicalise a raw template name for display and output.
///
/// Only the first `/templates/` segment is collapsed, and only when it is
/// preceded by a separator; a name starting with `templates/` is left alone.
/// Case and leading slashes are never touched.
pub fn format_render_name(raw: &str, style: NameStyle) -> String {
    let collapsed = raw.replacen(TEMPLATES_SEGMENT, "/", 1);

    match style {
        NameStyle::TrimSuffix => collapsed
            .strip_suffix(TEMPLATE_SUFFIX)
            .map(str::to_owned)
            .unwrap_or(collapsed),
        NameStyle::Legacy => collapsed
            .trim_end_matches(['.', 't', 'p', 'l'])
            .to_owned(),
    }
}
