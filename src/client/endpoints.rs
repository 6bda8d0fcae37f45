//! Business operations. Each one wraps its payload in a fixed envelope,
//! POSTs it to a fixed path through the pipeline and unwraps a fixed field
//! of the response.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::pipeline::ApiRequest;
use crate::client::SunlightClient;
use crate::error::Result;
use crate::transport::Transport;
use crate::utils::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Operation {
    SendCreditApp,
    CreatePricingQuote,
    QuoteUpdate,
    SendLoanDocs,
    FetchEquipments,
    SendSystemDesign,
    CreateApplicant,
    ObjectUpdate,
    SoftCredit,
    GetProjectDetail,
    InitiateChangeOrder,
}

/// How the payload is wrapped in the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{"projects": [payload]}`
    Projects,
    /// `{"equipmentManufacturers": [payload]}`
    EquipmentManufacturers,
    /// `{"prequal": payload}`
    Prequal,
    /// `{"projectIds": payload}`, not wrapped in an array
    ProjectIds,
}

impl Envelope {
    pub fn key(&self) -> &'static str {
        match self {
            Envelope::Projects => "projects",
            Envelope::EquipmentManufacturers => "equipmentManufacturers",
            Envelope::Prequal => "prequal",
            Envelope::ProjectIds => "projectIds",
        }
    }

    pub fn wrap(&self, payload: Value) -> Value {
        let value = match self {
            Envelope::Projects | Envelope::EquipmentManufacturers => Value::Array(vec![payload]),
            Envelope::Prequal | Envelope::ProjectIds => payload,
        };
        let mut body = Map::new();
        body.insert(self.key().to_owned(), value);
        Value::Object(body)
    }
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::SendCreditApp,
        Operation::CreatePricingQuote,
        Operation::QuoteUpdate,
        Operation::SendLoanDocs,
        Operation::FetchEquipments,
        Operation::SendSystemDesign,
        Operation::CreateApplicant,
        Operation::ObjectUpdate,
        Operation::SoftCredit,
        Operation::GetProjectDetail,
        Operation::InitiateChangeOrder,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Operation::SendCreditApp => API_CREDIT_APP,
            Operation::CreatePricingQuote => API_CREATE_ACCOUNT,
            Operation::QuoteUpdate => API_QUOTE_UPDATE,
            Operation::SendLoanDocs => API_SEND_LOAN_DOCS,
            Operation::FetchEquipments => API_FETCH_EQUIPMENTS,
            Operation::SendSystemDesign => API_SEND_SYSTEM_DESIGN,
            Operation::CreateApplicant => API_CREATE_APPLICANT,
            Operation::ObjectUpdate => API_OBJECT_UPDATE,
            Operation::SoftCredit => API_SOFT_CREDIT_APP,
            Operation::GetProjectDetail => API_GET_PROJECT_DETAIL,
            Operation::InitiateChangeOrder => API_CHANGE_ORDER,
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Operation::FetchEquipments => Envelope::EquipmentManufacturers,
            Operation::SoftCredit => Envelope::Prequal,
            Operation::GetProjectDetail => Envelope::ProjectIds,
            _ => Envelope::Projects,
        }
    }

    /// Response field handed back to the caller, `None` for the whole body
    pub fn response_key(&self) -> Option<&'static str> {
        match self {
            Operation::FetchEquipments => Some("equipmentManufacturers"),
            Operation::SoftCredit => None,
            _ => Some("projects"),
        }
    }

    /// Field of the params object that holds the payload
    pub fn param_key(&self) -> &'static str {
        match self {
            Operation::FetchEquipments => "equipments",
            Operation::SoftCredit => "softCreditObject",
            Operation::GetProjectDetail => "projectId",
            _ => "project",
        }
    }

    pub fn request(&self, payload: Value) -> ApiRequest {
        ApiRequest::post(self.path(), self.envelope().wrap(payload))
    }

    /// Missing response fields come back as `null`
    pub fn unwrap_response(&self, response: Value) -> Value {
        match self.response_key() {
            Some(key) => match response {
                Value::Object(mut map) => map.remove(key).unwrap_or(Value::Null),
                _ => Value::Null,
            },
            None => response,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectParams {
    #[serde(default)]
    pub project: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EquipmentParams {
    #[serde(default)]
    pub equipments: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoftCreditParams {
    #[serde(default)]
    pub soft_credit_object: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailParams {
    #[serde(default)]
    pub project_id: Value,
}

impl ProjectParams {
    pub fn new(project: Value) -> Self {
        Self { project }
    }
}

impl EquipmentParams {
    pub fn new(equipments: Value) -> Self {
        Self { equipments }
    }
}

impl SoftCreditParams {
    pub fn new(soft_credit_object: Value) -> Self {
        Self { soft_credit_object }
    }
}

impl ProjectDetailParams {
    pub fn new(project_id: Value) -> Self {
        Self { project_id }
    }
}

impl<T: Transport> SunlightClient<T> {
    /// Run `operation` with an already extracted payload
    pub async fn execute(&self, operation: Operation, payload: Value) -> Result<Value> {
        let response = self.make_request(operation.request(payload)).await?;
        Ok(operation.unwrap_response(response))
    }

    /// Run `operation` with a raw params object, e.g. `{"project": {..}}`.
    /// A missing param field is sent as `null`.
    pub async fn call(&self, operation: Operation, params: &Value) -> Result<Value> {
        let payload = params.get(operation.param_key()).cloned().unwrap_or(Value::Null);
        self.execute(operation, payload).await
    }

    pub async fn send_credit_app(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::SendCreditApp, params.project).await
    }

    pub async fn create_pricing_quote(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::CreatePricingQuote, params.project).await
    }

    pub async fn quote_update(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::QuoteUpdate, params.project).await
    }

    pub async fn send_loan_docs(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::SendLoanDocs, params.project).await
    }

    pub async fn fetch_equipments(&self, params: EquipmentParams) -> Result<Value> {
        self.execute(Operation::FetchEquipments, params.equipments).await
    }

    pub async fn send_system_design(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::SendSystemDesign, params.project).await
    }

    pub async fn create_applicant(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::CreateApplicant, params.project).await
    }

    pub async fn object_update(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::ObjectUpdate, params.project).await
    }

    /// Returns the whole response body
    pub async fn soft_credit(&self, params: SoftCreditParams) -> Result<Value> {
        self.execute(Operation::SoftCredit, params.soft_credit_object).await
    }

    pub async fn get_project_detail(&self, params: ProjectDetailParams) -> Result<Value> {
        self.execute(Operation::GetProjectDetail, params.project_id).await
    }

    /// Change a credit app after loan docs are signed (new quote, new credit, ..)
    pub async fn initiate_change_order(&self, params: ProjectParams) -> Result<Value> {
        self.execute(Operation::InitiateChangeOrder, params.project).await
    }
}
