//! The built-in rule registry.

use crate::{
    DoiContainsSpace, DoiIsUrl, DoiNotWrapped, EtAlNotWrapped, EtAlWithComma,
    IncorrectStyleReference, NoDoiPrefix, VolumeIssue,
};
use bibcheck_core::{IssueKind, RuleBox};

/// Returns every built-in style rule, in reporting order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(EtAlWithComma::new()),
        Box::new(EtAlNotWrapped::new()),
        Box::new(DoiContainsSpace::new()),
        Box::new(DoiNotWrapped::new()),
        Box::new(NoDoiPrefix::new()),
        Box::new(DoiIsUrl::new()),
        Box::new(VolumeIssue::new()),
        Box::new(IncorrectStyleReference::new()),
    ]
}

/// Looks up a built-in style rule by name, code or identifier
/// (`et-al-not-wrapped`, `BIB002` or `ET_AL_NOT_WRAPPED`).
///
/// DOI existence kinds are not style rules and return `None`.
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    let kind = IssueKind::from_name(name)?;
    all_rules().into_iter().find(|rule| rule.kind() == kind)
}
