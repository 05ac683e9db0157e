//! Line-oriented invoice builder.
//!
//! Single-threaded and synchronous: each command is handled fully (mutation,
//! one recompute, best-effort save) before the next line is read.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;

use facture_app::session::{EditorSession, PartyField};
use facture_core::{DomainResult, LineItemId};
use facture_invoicing::{Currency, PaymentTerms, TaxType};
use facture_storage::SnapshotStore;

const HELP: &str = "\
commands:
  show                          preview the invoice
  add                           append a blank line item
  rm <row>                      remove a line item
  desc <row> <text>             set an item's description
  qty <row> <value>             set an item's quantity
  price <row> <value>           set an item's unit price
  tax <rate>                    set the tax rate (%)
  taxtype <flat|gst|vat>        set the tax label
  discount <rate>               set the discount rate (%)
  currency <usd|eur|gbp|inr|jpy>
  number <text>                 set the invoice number
  issue <yyyy-mm-dd>            set the issue date
  due <yyyy-mm-dd>              set the due date
  terms <net7|net15|net30>      set payment terms (re-derives due date)
  from <name|email|address> <text>
  to <name|email|address> <text>
  notes <text>
  export [path]                 write the invoice document
  reset                         discard everything, start a fresh draft
  quit";

fn main() -> Result<()> {
    facture_observability::init();

    let store = match SnapshotStore::open() {
        Ok(store) => Some(store),
        Err(err) => {
            warn!(%err, "persistence unavailable; edits will not be saved");
            None
        }
    };
    let mut session = EditorSession::load_or_draft(store);

    println!("facture invoice builder (type 'help' for commands)");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        match run_command(&mut session, line.trim()) {
            Outcome::Continue(message) => {
                if !message.is_empty() {
                    println!("{message}");
                }
            }
            Outcome::Quit => break,
        }
        stdout.flush()?;
    }

    Ok(())
}

enum Outcome {
    Continue(String),
    Quit,
}

fn ok() -> Outcome {
    Outcome::Continue(String::new())
}

fn say(message: impl Into<String>) -> Outcome {
    Outcome::Continue(message.into())
}

fn run_command(session: &mut EditorSession, line: &str) -> Outcome {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    };

    match command {
        "" => ok(),
        "help" => say(HELP),
        "show" => say(facture_app::preview::render(session.invoice())),
        "add" => {
            session.add_item();
            say(format!("added row {}", session.invoice().items.len()))
        }
        "rm" => with_item(session, rest, |session, id| {
            match session.remove_item(id) {
                Ok(()) => ok(),
                Err(err) => say(err.to_string()),
            }
        }),
        "desc" => item_edit(session, rest, |session, id, value| {
            session.set_item_description(id, value)
        }),
        "qty" => item_edit(session, rest, |session, id, value| {
            session.set_item_quantity(id, value)
        }),
        "price" => item_edit(session, rest, |session, id, value| {
            session.set_item_unit_price(id, value)
        }),
        "tax" => {
            session.set_tax_rate(rest);
            ok()
        }
        "discount" => {
            session.set_discount_rate(rest);
            ok()
        }
        "taxtype" => match rest.to_ascii_lowercase().as_str() {
            "flat" => set_tax_type(session, TaxType::Flat),
            "gst" => set_tax_type(session, TaxType::Gst),
            "vat" => set_tax_type(session, TaxType::Vat),
            other => say(format!("unknown tax type: {other}")),
        },
        "currency" => match rest.parse::<Currency>() {
            Ok(currency) => {
                session.set_currency(currency);
                ok()
            }
            Err(err) => say(err.to_string()),
        },
        "number" => {
            session.set_invoice_number(rest);
            ok()
        }
        "issue" => with_date(rest, |date| session.set_issue_date(date)),
        "due" => with_date(rest, |date| session.set_due_date(date)),
        "terms" => match rest.to_ascii_lowercase().as_str() {
            "net7" => set_terms(session, PaymentTerms::Net7),
            "net15" => set_terms(session, PaymentTerms::Net15),
            "net30" => set_terms(session, PaymentTerms::Net30),
            other => say(format!("unknown payment terms: {other}")),
        },
        "from" => party_edit(session, true, rest),
        "to" => party_edit(session, false, rest),
        "notes" => {
            session.set_notes(rest);
            ok()
        }
        "export" => export(session, rest),
        "reset" => {
            session.reset();
            say("fresh draft started")
        }
        "quit" | "exit" => Outcome::Quit,
        other => say(format!("unknown command: {other} (try 'help')")),
    }
}

fn set_tax_type(session: &mut EditorSession, tax_type: TaxType) -> Outcome {
    session.set_tax_type(tax_type);
    ok()
}

fn set_terms(session: &mut EditorSession, terms: PaymentTerms) -> Outcome {
    session.set_payment_terms(terms);
    say(format!("due date is now {}", session.invoice().due_date))
}

/// Resolve a 1-based row number to the item's id.
fn with_item(
    session: &mut EditorSession,
    row: &str,
    then: impl FnOnce(&mut EditorSession, LineItemId) -> Outcome,
) -> Outcome {
    let Ok(row) = row.parse::<usize>() else {
        return say("expected a row number");
    };
    let id = session
        .invoice()
        .items
        .get(row.wrapping_sub(1))
        .map(|item| item.id);
    match id {
        Some(id) => then(session, id),
        None => say(format!("no row {row}")),
    }
}

fn item_edit(
    session: &mut EditorSession,
    rest: &str,
    edit: impl FnOnce(&mut EditorSession, LineItemId, &str) -> DomainResult<()>,
) -> Outcome {
    let (row, value) = match rest.split_once(char::is_whitespace) {
        Some((row, value)) => (row, value.trim()),
        None => (rest, ""),
    };
    with_item(session, row, |session, id| match edit(session, id, value) {
        Ok(()) => ok(),
        Err(err) => say(err.to_string()),
    })
}

fn with_date(raw: &str, set: impl FnOnce(NaiveDate)) -> Outcome {
    match raw.parse::<NaiveDate>() {
        Ok(date) => {
            set(date);
            ok()
        }
        Err(_) => say("expected a date like 2026-03-07"),
    }
}

fn party_edit(session: &mut EditorSession, issuer: bool, rest: &str) -> Outcome {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    let field = match field.to_ascii_lowercase().as_str() {
        "name" => PartyField::Name,
        "email" => PartyField::Email,
        "address" => PartyField::Address,
        other => return say(format!("unknown field: {other} (name, email, address)")),
    };
    session.set_party_field(issuer, field, value);
    ok()
}

fn export(session: &EditorSession, rest: &str) -> Outcome {
    let invoice = session.invoice();
    let path = if rest.is_empty() {
        PathBuf::from(facture_export::default_filename(invoice))
    } else {
        PathBuf::from(rest)
    };
    match facture_export::export_to_file(invoice, &path) {
        Ok(()) => say(format!("wrote {}", path.display())),
        Err(err) => {
            warn!(%err, path = %path.display(), "export failed");
            say(format!("export failed: {err}"))
        }
    }
}
