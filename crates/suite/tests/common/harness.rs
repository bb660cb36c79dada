//! Suite harness: mock service + engine wiring.

use covenant_contract::{
    ApiClient, ContractResult, Endpoint, RequestBuilder, ResponseExpectation, SchemaRegistry,
    Session, TargetConfig, Verifier, login,
};
use covenant_suite::fixtures;

use super::service::MockService;

/// An expectation pre-loaded with the status and headers every JSON
/// response of the service must carry.
pub fn express_json_expectation(status: u16) -> ResponseExpectation {
    ResponseExpectation::new()
        .status(status)
        .header(fixtures::X_POWERED_BY.0, fixtures::X_POWERED_BY.1)
        .header(fixtures::JSON_CONTENT_TYPE.0, fixtures::JSON_CONTENT_TYPE.1)
}

/// One booted service instance plus everything a scenario needs to talk
/// to it: a configured client, the schema registry, and login helpers.
///
/// # Example
///
/// ```rust,ignore
/// let harness = SuiteHarness::new()?;
/// let response = harness.execute(RequestBuilder::new(fixtures::GET_COUNTRIES))?;
/// harness.verifier().verify(&response, &expectation)?;
/// ```
pub struct SuiteHarness {
    /// The target configuration, pointed at the mock service.
    pub config: TargetConfig,
    /// The blocking client scenarios send requests with.
    pub client: ApiClient,
    /// The compiled schema registry, loaded from `schemas/`.
    pub schemas: SchemaRegistry,
    /// The running mock service (its store doubles as the backing store).
    pub service: MockService,
}

impl SuiteHarness {
    /// Boots a fresh mock service and wires the engine to it.
    pub fn new() -> ContractResult<Self> {
        let service = MockService::spawn();
        let mut config = TargetConfig::for_testing(&service.base_url);
        config.graphql_url = service.graphql_url();
        let client = ApiClient::new(&config)?;
        let schemas = SchemaRegistry::load_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/schemas"))?;
        Ok(Self {
            config,
            client,
            schemas,
            service,
        })
    }

    /// A verifier backed by the suite's schema registry.
    pub fn verifier(&self) -> Verifier<'_> {
        Verifier::with_schemas(&self.schemas)
    }

    /// Resolves a builder against the REST base URL and sends it.
    pub fn execute(
        &self,
        builder: RequestBuilder,
    ) -> ContractResult<covenant_contract::ApiResponse> {
        self.client.execute(builder.build(&self.config.base_url)?)
    }

    /// Resolves a builder against the GraphQL URL and sends it.
    pub fn execute_graphql(
        &self,
        builder: RequestBuilder,
    ) -> ContractResult<covenant_contract::ApiResponse> {
        self.client
            .execute(builder.build(&self.config.graphql_url)?)
    }

    /// Logs in as the staff account and returns the session.
    pub fn login_staff(&self) -> ContractResult<Session> {
        login(
            &self.client,
            &self.config.base_url,
            &fixtures::LOGIN,
            &fixtures::staff_credentials(),
        )
    }

    /// A builder for an endpoint, for scenarios that add nothing else.
    pub fn request(&self, endpoint: Endpoint) -> RequestBuilder {
        RequestBuilder::new(endpoint)
    }
}
