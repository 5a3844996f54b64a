//! Subgroup lists of the standard analysis.

use crate::subgroup::Subgroup;

/// Individual mutations compared against the frequent group, in report order.
const SINGLE_MUTATIONS: [Subgroup; 7] = [
    Subgroup::Ex20Ins,
    Subgroup::G719X,
    Subgroup::L861Q,
    Subgroup::S768I,
    Subgroup::E709X,
    Subgroup::Ex19Del,
    Subgroup::L858R,
];

/// Pairs compared in the standard report.
#[must_use]
pub fn comparisons() -> Vec<(Subgroup, Subgroup)> {
    let mut pairs = vec![
        (Subgroup::WildType, Subgroup::Mutated),
        (Subgroup::Rare, Subgroup::Frequent),
        (Subgroup::Frequent, Subgroup::RareDouble),
    ];
    pairs.extend(
        SINGLE_MUTATIONS
            .into_iter()
            .map(|g| (Subgroup::Frequent, g)),
    );
    pairs
}

/// Subgroups whose ages are tested for normality.
#[must_use]
pub fn normality() -> Vec<Subgroup> {
    let mut groups = vec![
        Subgroup::Mutated,
        Subgroup::WildType,
        Subgroup::Frequent,
        Subgroup::Rare,
        Subgroup::RareDouble,
    ];
    groups.extend_from_slice(&SINGLE_MUTATIONS[..5]);
    groups
}

/// Subgroups profiled by default.
#[must_use]
pub fn profiles() -> Vec<Subgroup> {
    let mut groups = vec![Subgroup::Rare];
    groups.extend(SINGLE_MUTATIONS);
    groups
}

/// Subgroups drawn together, one panel per entry.
#[must_use]
pub fn plot_panels() -> Vec<Vec<Subgroup>> {
    let mut frequent_vs_rare_singles = vec![Subgroup::Frequent];
    frequent_vs_rare_singles.extend_from_slice(&SINGLE_MUTATIONS[..5]);
    vec![
        vec![Subgroup::Mutated, Subgroup::WildType],
        vec![Subgroup::Frequent, Subgroup::Rare],
        vec![Subgroup::Frequent, Subgroup::RareDouble],
        frequent_vs_rare_singles,
    ]
}
