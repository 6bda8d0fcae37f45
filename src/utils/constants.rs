//! Shared constants and invariants

use std::time::Duration;

/// 30 min
pub const DEFAULT_ACCESS_TOKEN_CACHE_EXPIRY: Duration = Duration::from_millis(1_800_000);

pub const TEST_BASE_URL: &str = "https://test.connect.boomi.com/ws/rest/v1/pt";
pub const PROD_BASE_URL: &str = "https://connect.boomi.com/ws/rest/v1";

// API paths, relative to the base URL
pub const API_TOKEN: &str = "gettoken/accesstoken";
pub const API_CREDIT_APP: &str = "credit/submit";
pub const API_CREATE_ACCOUNT: &str = "pricing/createaccount";
pub const API_OBJECT_UPDATE: &str = "object/applicant";
pub const API_QUOTE_UPDATE: &str = "object/quote";
pub const API_SEND_LOAN_DOCS: &str = "sendloandocs/request/";
pub const API_FETCH_EQUIPMENTS: &str = "equipment/fetchequipments/";
pub const API_SEND_SYSTEM_DESIGN: &str = "equipment/createequipment/";
pub const API_CREATE_APPLICANT: &str = "applicant/create/";
pub const API_SOFT_CREDIT_APP: &str = "prequal/create/";
pub const API_GET_PROJECT_DETAIL: &str = "getstatus/status/";
pub const API_CHANGE_ORDER: &str = "changeorder/submit/";

// Headers
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_SF_ACCESS_TOKEN: &str = "SFAccessToken";

// Error prefixes
pub const ERROR_TOKEN_NOT_GENERATED: &str =
    "Sunlight module encountered error while making request - Token request returned invalid status code";
pub const ERROR_REQUEST_NOT_COMPLETED: &str =
    "Sunlight module encountered error while making request - API request returned invalid status code";
pub const ERROR_INVALID_REQUEST: &str =
    "Sunlight module encountered error while making request - API call returned error";
