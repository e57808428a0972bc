//! Coercion of loosely typed request fields into engine inputs.
//!
//! Clients send ids and amounts either as JSON numbers or as strings, and
//! treat `0` and `""` as "not given". These helpers apply those rules before
//! anything reaches the engine.

use api_types::{
    Numeric,
    account::AccountNew,
    transaction::{TransactionNew, TransactionUpdate},
};
use engine::{Amount, EngineError};

const USER_ID_NOT_INTEGER: &str = "User ID must be an integer";
const TRANSACTION_ID_NOT_INTEGER: &str = "Transaction ID must be an integer";

fn is_blank(value: &Numeric) -> bool {
    match value {
        Numeric::Number(n) => *n == 0.0,
        Numeric::Text(t) => t.is_empty(),
    }
}

fn integer(value: &Numeric) -> Option<i64> {
    match value {
        Numeric::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Some(*n as i64),
        Numeric::Number(_) => None,
        Numeric::Text(t) => t.trim().parse().ok(),
    }
}

fn amount(value: Numeric) -> Result<Amount, EngineError> {
    match value {
        Numeric::Number(n) => Amount::new(n),
        Numeric::Text(t) => t.parse(),
    }
}

/// Registration input. A missing field becomes an empty one, which the
/// engine rejects.
pub(crate) fn account_new(payload: AccountNew) -> engine::AccountNew {
    engine::AccountNew {
        username: payload.username.unwrap_or_default(),
        password: payload.password.unwrap_or_default(),
        first_name: payload.fname.unwrap_or_default(),
        last_name: payload.lname.unwrap_or_default(),
    }
}

/// `userId` query filter. Absent or empty means every owner.
pub(crate) fn owner_filter(raw: Option<&str>) -> Result<Option<i64>, EngineError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| EngineError::InvalidInput(USER_ID_NOT_INTEGER.to_string())),
    }
}

/// A transaction id that must be given.
pub(crate) fn transaction_id(raw: Option<Numeric>, missing: &str) -> Result<i64, EngineError> {
    let value = raw
        .filter(|value| !is_blank(value))
        .ok_or_else(|| EngineError::MissingField(missing.to_string()))?;
    integer(&value).ok_or_else(|| EngineError::InvalidInput(TRANSACTION_ID_NOT_INTEGER.to_string()))
}

/// Entry creation input.
///
/// Only presence is checked: an empty description or type is accepted. A
/// blank `userId` leaves the owner to the engine default.
pub(crate) fn transaction_new(payload: TransactionNew) -> Result<engine::TransactionNew, EngineError> {
    let (Some(description), Some(raw_amount), Some(kind)) =
        (payload.description, payload.amount, payload.kind)
    else {
        return Err(EngineError::MissingField(
            "Description, amount, and type are required".to_string(),
        ));
    };

    let user_id = match payload.user_id.filter(|value| !is_blank(value)) {
        None => None,
        Some(value) => Some(
            integer(&value)
                .ok_or_else(|| EngineError::InvalidInput(USER_ID_NOT_INTEGER.to_string()))?,
        ),
    };

    Ok(engine::TransactionNew {
        user_id,
        description,
        amount: amount(raw_amount)?,
        kind,
    })
}

/// Amount update input. `amount: 0` is a value, not a missing field.
pub(crate) fn transaction_update(payload: TransactionUpdate) -> Result<(i64, Amount), EngineError> {
    const MISSING: &str = "Transaction ID and new amount are required";

    let Some(raw_amount) = payload.amount else {
        return Err(EngineError::MissingField(MISSING.to_string()));
    };
    let id = transaction_id(payload.transaction_id, MISSING)?;
    Ok((id, amount(raw_amount)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: f64) -> Option<Numeric> {
        Some(Numeric::Number(n))
    }

    fn text(t: &str) -> Option<Numeric> {
        Some(Numeric::Text(t.to_string()))
    }

    fn new_entry(user_id: Option<Numeric>, amount: Option<Numeric>) -> TransactionNew {
        TransactionNew {
            user_id,
            description: Some("Coffee".to_string()),
            amount,
            kind: Some("expense".to_string()),
        }
    }

    #[test]
    fn owner_filter_treats_empty_as_absent() {
        assert_eq!(owner_filter(None).unwrap(), None);
        assert_eq!(owner_filter(Some("")).unwrap(), None);
        assert_eq!(owner_filter(Some("7")).unwrap(), Some(7));
        assert_eq!(
            owner_filter(Some("seven")),
            Err(EngineError::InvalidInput(USER_ID_NOT_INTEGER.to_string()))
        );
    }

    #[test]
    fn transaction_id_rejects_falsy_values() {
        for raw in [None, number(0.0), text("")] {
            assert_eq!(
                transaction_id(raw, "missing"),
                Err(EngineError::MissingField("missing".to_string()))
            );
        }
    }

    #[test]
    fn transaction_id_accepts_numbers_and_digits() {
        assert_eq!(transaction_id(number(12.0), "missing").unwrap(), 12);
        assert_eq!(transaction_id(text("12"), "missing").unwrap(), 12);
        assert_eq!(
            transaction_id(number(1.5), "missing"),
            Err(EngineError::InvalidInput(TRANSACTION_ID_NOT_INTEGER.to_string()))
        );
    }

    #[test]
    fn blank_owner_falls_back_to_default() {
        for raw in [None, number(0.0), text("")] {
            let tx = transaction_new(new_entry(raw, number(4.5))).unwrap();
            assert_eq!(tx.user_id, None);
        }
        let tx = transaction_new(new_entry(text("3"), number(4.5))).unwrap();
        assert_eq!(tx.user_id, Some(3));
    }

    #[test]
    fn new_entry_requires_presence_only() {
        let tx = transaction_new(TransactionNew {
            user_id: None,
            description: Some(String::new()),
            amount: number(0.0),
            kind: Some(String::new()),
        })
        .unwrap();
        assert_eq!(tx.description, "");
        assert_eq!(tx.amount.to_string(), "0.00");

        let err = transaction_new(new_entry(None, None)).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingField("Description, amount, and type are required".to_string())
        );
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = transaction_new(new_entry(None, text("a lot"))).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn update_accepts_zero_amount() {
        let (id, amount) = transaction_update(TransactionUpdate {
            transaction_id: number(5.0),
            amount: number(0.0),
        })
        .unwrap();
        assert_eq!(id, 5);
        assert_eq!(amount.to_string(), "0.00");
    }

    #[test]
    fn update_requires_both_fields() {
        let missing =
            EngineError::MissingField("Transaction ID and new amount are required".to_string());
        let no_amount = transaction_update(TransactionUpdate {
            transaction_id: number(5.0),
            amount: None,
        });
        let no_id = transaction_update(TransactionUpdate {
            transaction_id: None,
            amount: number(1.0),
        });
        assert_eq!(no_amount.unwrap_err(), missing);
        assert_eq!(no_id.unwrap_err(), missing);
    }

    #[test]
    fn missing_account_fields_become_empty() {
        let account = account_new(AccountNew {
            username: Some("alice".to_string()),
            ..Default::default()
        });
        assert_eq!(account.username, "alice");
        assert!(account.password.is_empty());
    }
}
