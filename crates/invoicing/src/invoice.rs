use chrono::{Datelike, Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use facture_core::{DomainError, InvoiceId, LineItemId};

/// Display currency for an invoice. Formatting only; no conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Jpy => "¥",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
        }
    }

    /// Two-decimal money display, e.g. `$20.01`.
    ///
    /// The single formatting rule shared by the preview and the exported
    /// document; neither defines its own.
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.symbol(), amount)
    }
}

impl core::str::FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "INR" => Ok(Currency::Inr),
            "JPY" => Ok(Currency::Jpy),
            other => Err(DomainError::validation(format!(
                "unknown currency code: {other}"
            ))),
        }
    }
}

/// Label attached to the tax line. Carries no rate logic of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxType {
    Flat,
    Gst,
    Vat,
}

impl TaxType {
    pub fn label(&self) -> &'static str {
        match self {
            TaxType::Flat => "Tax",
            TaxType::Gst => "GST",
            TaxType::Vat => "VAT",
        }
    }
}

/// Standard net payment terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentTerms {
    Net7,
    Net15,
    Net30,
}

impl PaymentTerms {
    pub fn days(&self) -> i64 {
        match self {
            PaymentTerms::Net7 => 7,
            PaymentTerms::Net15 => 15,
            PaymentTerms::Net30 => 30,
        }
    }

    pub fn due_date(&self, issue_date: NaiveDate) -> NaiveDate {
        issue_date + Duration::days(self.days())
    }
}

/// Invoice payment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    PartiallyPaid,
}

/// Payment bookkeeping attached to an invoice. Pass-through for the totals
/// engine; nothing here is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub status: InvoiceStatus,
    pub paid_amount: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            status: InvoiceStatus::Draft,
            paid_amount: None,
            payment_date: None,
            payment_method: None,
        }
    }
}

/// One side of the invoice (issuer or recipient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// One billable row.
///
/// `amount` is derived (`quantity` x `unit_price`, rounded) and is only ever
/// written by the totals engine; readers must treat it as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    /// Fresh row as the form adds it: quantity 1, price 0.
    ///
    /// `amount` starts at zero and is filled in by the next recompute.
    pub fn blank() -> Self {
        Self {
            id: LineItemId::new(),
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: LineItemId::new(),
            description: description.into(),
            quantity,
            unit_price,
            amount: Decimal::ZERO,
        }
    }
}

/// The invoice aggregate: everything the form edits plus the derived totals.
///
/// `subtotal`, `tax_amount`, `discount_amount` and `total` are derived and
/// only valid immediately after [`crate::totals::recompute`]; the editing
/// layer must recompute after every mutation of items or rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub from: Party,
    pub to: Party,
    pub items: Vec<LineItem>,
    pub notes: String,
    pub subtotal: Decimal,
    pub tax_type: TaxType,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount_rate: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub currency: Currency,
    pub payment_terms: PaymentTerms,
    pub payment: PaymentDetails,
}

impl Invoice {
    /// Initial editing state: one blank line item, zero rates and totals,
    /// an invoice number derived from today's date, due in 14 days.
    pub fn draft() -> Self {
        Self::draft_on(Local::now().date_naive())
    }

    /// Same as [`Invoice::draft`] with an explicit "today" (deterministic in
    /// tests).
    pub fn draft_on(today: NaiveDate) -> Self {
        Self {
            id: InvoiceId::new(),
            invoice_number: format!(
                "INV-{}-{:02}{:02}",
                today.year(),
                today.month(),
                today.day()
            ),
            issue_date: today,
            due_date: today + Duration::days(14),
            from: Party::default(),
            to: Party::default(),
            items: vec![LineItem::blank()],
            notes: String::new(),
            subtotal: Decimal::ZERO,
            tax_type: TaxType::Flat,
            tax_rate: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            discount_rate: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            currency: Currency::Usd,
            payment_terms: PaymentTerms::Net15,
            payment: PaymentDetails::default(),
        }
    }
}
