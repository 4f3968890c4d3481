use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// opaque bearer token plus whatever profile fields the backend returned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialRecord{
    pub token: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl CredentialRecord {
    pub fn new(token: impl Into<String>) -> Self {
        CredentialRecord { token: token.into(), profile: Map::new() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse{
    pub token: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl From<LoginResponse> for CredentialRecord {
    fn from(res: LoginResponse) -> Self {
        CredentialRecord { token: res.token, profile: res.profile }
    }
}

#[derive(Serialize, Debug)]
pub struct EmailAndPassword{
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_profile_fields_survive_a_roundtrip(){
        let body = r#"{"token":"abc.def","message":"Signined in Successfully","name":"Vivek"}"#;
        let record: CredentialRecord = serde_json::from_str::<LoginResponse>(body).unwrap().into();

        assert_eq!(record.token, "abc.def");
        assert_eq!(record.profile.get("name").unwrap(), "Vivek");

        let stored = serde_json::to_string(&record).unwrap();
        let back: CredentialRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, record);
    }
}
