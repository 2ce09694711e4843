//! The attribute schema: which fields of a card are comparable, grouped into
//! sections, and how each one is rendered.

use std::sync::LazyLock;

/// How a row's value is turned into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Plain,
    LongText,
    Markup,
    Tags,
    List,
    Link,
    RankedBenefits,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    /// Dotted path into the card record, e.g. `bank_fee_structure.annual_fee`.
    pub path: &'static str,
    pub label: &'static str,
    pub kind: AttributeKind,
    /// The value has an explanatory sibling at `<path>_comment`.
    pub fee_pair: bool,
}

impl AttributeRow {
    pub const fn new(path: &'static str, label: &'static str, kind: AttributeKind) -> Self {
        Self {
            path,
            label,
            kind,
            fee_pair: false,
        }
    }

    pub const fn fee(path: &'static str, label: &'static str) -> Self {
        Self {
            path,
            label,
            kind: AttributeKind::Plain,
            fee_pair: true,
        }
    }

    pub fn comment_path(&self) -> Option<String> {
        self.fee_pair.then(|| format!("{}_comment", self.path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<AttributeRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    pub sections: Vec<Section>,
}

impl AttributeSchema {
    pub fn rows(&self) -> impl Iterator<Item = &AttributeRow> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    pub fn row(&self, path: &str) -> Option<&AttributeRow> {
        self.rows().find(|row| row.path == path)
    }
}

static DEFAULT_SCHEMA: LazyLock<AttributeSchema> = LazyLock::new(build_default_schema);

/// The schema used by the comparison panel and the detail view.
pub fn default_schema() -> &'static AttributeSchema {
    &DEFAULT_SCHEMA
}

fn build_default_schema() -> AttributeSchema {
    use AttributeKind::*;

    AttributeSchema {
        sections: vec![
            Section {
                title: "Key Benefits",
                rows: vec![
                    AttributeRow::new("product_usps", "Highlights", RankedBenefits),
                    AttributeRow::new("tags", "Best For", Tags),
                    AttributeRow::new("welcome_benefits", "Welcome Benefits", LongText),
                    AttributeRow::new("milestone_benefits", "Milestone Benefits", Markup),
                ],
            },
            Section {
                title: "Fees & Charges",
                rows: vec![
                    AttributeRow::fee("bank_fee_structure.joining_fee", "Joining Fee"),
                    AttributeRow::fee("bank_fee_structure.annual_fee", "Annual Fee"),
                    AttributeRow::fee("bank_fee_structure.apr_fees", "APR"),
                    AttributeRow::fee("bank_fee_structure.forex_markup", "Forex Markup"),
                    AttributeRow::fee("bank_fee_structure.late_payment_fee", "Late Payment Fee"),
                    AttributeRow::fee("bank_fee_structure.cash_advance_fee", "Cash Advance Fee"),
                ],
            },
            Section {
                title: "Rewards",
                rows: vec![
                    AttributeRow::new("reward_conversion_rate", "Reward Rate", Plain),
                    AttributeRow::new("redemption_options", "Redemption Options", List),
                    AttributeRow::new("lounge_access", "Lounge Access", Plain),
                    AttributeRow::new("exclusion_earnings", "Earning Exclusions", Markup),
                    AttributeRow::new("exclusion_spends", "Spend Exclusions", Markup),
                ],
            },
            Section {
                title: "Eligibility",
                rows: vec![
                    AttributeRow::new("eligibility.min_age", "Minimum Age", Plain),
                    AttributeRow::new("eligibility.max_age", "Maximum Age", Plain),
                    AttributeRow::new("eligibility.income_salaried", "Income (Salaried)", Plain),
                    AttributeRow::new("eligibility.income_self_employed", "Income (Self-employed)", Plain),
                    AttributeRow::new("eligibility.documents", "Documents", List),
                ],
            },
            Section {
                title: "Card Details",
                rows: vec![
                    AttributeRow::new("card_network", "Network", Plain),
                    AttributeRow::new("card_type", "Card Type", Plain),
                    AttributeRow::new("features", "Features", LongText),
                    AttributeRow::new("network_url", "Apply", Link),
                ],
            },
        ],
    }
}
