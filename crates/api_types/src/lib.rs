use serde::{Deserialize, Serialize};

/// A JSON value clients send either as a number or as a string.
///
/// Web forms post `"4.50"` as often as `4.5`, so ids and amounts accept both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

pub mod account {
    use super::*;

    /// Request body of `POST /add-user`.
    ///
    /// Every field is optional on the wire: a missing field is reported as a
    /// validation failure instead of a decoding error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AccountNew {
        pub username: Option<String>,
        pub password: Option<String>,
        pub fname: Option<String>,
        pub lname: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountCreated {
        pub success: bool,
        pub message: String,
    }

    /// Request body of `POST /check-user`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AccountCheck {
        pub username: Option<String>,
        pub password: Option<String>,
    }

    /// Response body of `POST /check-user`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountExists {
        pub exist: bool,
        pub message: String,
        /// Session token, only present when `exist` is `true`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub token: Option<String>,
    }
}

pub mod session {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoggedOut {
        pub message: String,
    }
}

pub mod transaction {
    use super::*;

    /// Query string of `GET /get-transactions`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionQuery {
        #[serde(rename = "userId")]
        pub user_id: Option<String>,
    }

    /// Request body of `POST /add-transaction`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// Owner of the entry. Falls back to the placeholder account `1`.
        #[serde(rename = "userId")]
        pub user_id: Option<Numeric>,
        pub description: Option<String>,
        pub amount: Option<Numeric>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
    }

    /// Request body of `POST /update-transaction`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub transaction_id: Option<Numeric>,
        pub amount: Option<Numeric>,
    }

    /// Request body of `POST /delete-transaction`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionDelete {
        pub transaction_id: Option<Numeric>,
    }

    /// A budget entry as seen by clients.
    ///
    /// The storage column `category` is exposed as `description`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        pub description: String,
        pub amount: String,
        #[serde(rename = "type")]
        pub kind: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }

    /// Response body of a create or update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionSaved {
        pub success: bool,
        pub transaction: TransactionView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionDeleted {
        pub success: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accepts_numbers_and_strings() {
        let parsed: transaction::TransactionUpdate =
            serde_json::from_str(r#"{"transaction_id": 7, "amount": "4.5"}"#).unwrap();
        assert_eq!(parsed.transaction_id, Some(Numeric::Number(7.0)));
        assert_eq!(parsed.amount, Some(Numeric::Text("4.5".to_string())));
    }

    #[test]
    fn null_fields_deserialize_as_missing() {
        let parsed: transaction::TransactionNew =
            serde_json::from_str(r#"{"userId": null, "description": "Coffee"}"#).unwrap();
        assert_eq!(parsed.user_id, None);
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.description.as_deref(), Some("Coffee"));
    }

    #[test]
    fn transaction_view_renames_kind_to_type() {
        let view = transaction::TransactionView {
            id: 1,
            description: "Coffee".to_string(),
            amount: "4.50".to_string(),
            kind: "expense".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "expense");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn token_is_omitted_when_absent() {
        let body = account::AccountExists {
            exist: false,
            message: "Invalid username or password".to_string(),
            token: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("token").is_none());
    }
}
