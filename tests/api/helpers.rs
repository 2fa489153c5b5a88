use reqwest::{cookie::Jar, Response, Url};
use serde_json::Value;
use std::sync::Arc;
use team_portal::{
    app_state::{
        AppState, ApplicationStoreType, GeneratedImageStoreType,
        HealthCacheType, MemberStoreType, ProjectStoreType,
    },
    domain::{ApiKeyPool, Email, Member, MemberName},
    services::{
        data_stores::{
            HashmapApplicationStore, HashmapHealthCache, HashmapImageStore,
            HashmapMemberStore, HashmapProjectStore,
        },
        openai_image_client::OpenAiImageClient,
        postmark_email_client::PostmarkEmailClient,
    },
    utils::{
        auth::generate_auth_cookie,
        constants::{env, test},
    },
    Application,
};
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub cookie_jar: Arc<Jar>,
    pub http_client: reqwest::Client,
    pub email_server: MockServer,
    pub image_server: MockServer,
    pub member_store: MemberStoreType,
    pub application_store: ApplicationStoreType,
    pub project_store: ProjectStoreType,
    pub image_store: GeneratedImageStoreType,
    pub health_cache: HealthCacheType,
}

impl TestApp {
    pub async fn new() -> Self {
        std::env::set_var(env::JWT_SECRET_ENV_VAR, "test-secret");

        let member_store: MemberStoreType =
            Arc::new(RwLock::new(HashmapMemberStore::default()));
        let application_store: ApplicationStoreType =
            Arc::new(RwLock::new(HashmapApplicationStore::default()));
        let project_store: ProjectStoreType =
            Arc::new(RwLock::new(HashmapProjectStore::default()));
        let image_store: GeneratedImageStoreType =
            Arc::new(RwLock::new(HashmapImageStore::default()));
        let health_cache: HealthCacheType =
            Arc::new(RwLock::new(HashmapHealthCache::default()));

        let email_server = MockServer::start().await;
        let email_client = Arc::new(configure_postmark_email_client(
            email_server.uri(),
        ));

        let image_server = MockServer::start().await;
        let image_client =
            Arc::new(configure_image_client(image_server.uri()));

        let app_state = AppState::new(
            member_store.clone(),
            application_store.clone(),
            project_store.clone(),
            image_store.clone(),
            health_cache.clone(),
            email_client,
            image_client,
        );

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .unwrap();

        Self {
            address,
            cookie_jar,
            http_client,
            email_server,
            image_server,
            member_store,
            application_store,
            project_store,
            image_store,
            health_cache,
        }
    }

    /// Puts a valid auth cookie in the jar, as if issued by the
    /// identity service.
    pub fn log_in(&self) {
        let email = Email::parse("admin@example.com").unwrap();
        let cookie = generate_auth_cookie(&email).unwrap();
        let url = Url::parse(&self.address).unwrap();
        self.cookie_jar.add_cookie_str(
            &format!("{}={}; Path=/", cookie.name(), cookie.value()),
            &url,
        );
    }

    pub async fn seed_member(
        &self,
        order: i32,
        name: &str,
        email: &str,
    ) -> Member {
        let mut member =
            Member::new(order, MemberName::parse(name.to_owned()).unwrap());
        member.email = email.to_owned();
        self.member_store
            .write()
            .await
            .upsert_member(&member)
            .await
            .unwrap();
        member
    }

    pub async fn get_members_by_type(&self, member_type: &str) -> Response {
        self.http_client
            .get(format!("{}/members-by-type/", &self.address))
            .query(&[("member_type", member_type)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_apply<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/apply/", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_applications(&self) -> Response {
        self.http_client
            .get(format!("{}/applications/", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_categories(&self) -> Response {
        self.http_client
            .get(format!("{}/member/category", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_category<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/member/category", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_member_images(
        &self,
        files: &[(&str, &[u8])],
    ) -> Response {
        let mut form = reqwest::multipart::Form::new();
        for (filename, bytes) in files {
            let part = reqwest::multipart::Part::bytes(bytes.to_vec())
                .file_name(filename.to_string());
            form = form.part("files", part);
        }

        self.http_client
            .post(format!("{}/member/image", &self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_projects(&self) -> Response {
        self.http_client
            .get(format!("{}/projects/", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_project<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/projects/", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_marketing_image<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/projects/marketing-ai/", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_health_check(&self) -> Response {
        self.http_client
            .get(format!("{}/health-check/", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {}
}

pub async fn get_json_response_body(response: Response) -> Value {
    response
        .json()
        .await
        .expect("Failed to parse response body as JSON")
}

fn configure_postmark_email_client(base_url: String) -> PostmarkEmailClient {
    let sender = Email::parse("portal@example.com").unwrap();
    let http_client = reqwest::Client::builder()
        .timeout(test::email_client::TIMEOUT)
        .build()
        .unwrap();

    PostmarkEmailClient::new(
        base_url,
        sender,
        secrecy::Secret::new("postmark-test-token".to_owned()),
        http_client,
    )
}

fn configure_image_client(base_url: String) -> OpenAiImageClient {
    let key_pool = ApiKeyPool::new(vec![
        secrecy::Secret::new("key-a".to_owned()),
        secrecy::Secret::new("key-b".to_owned()),
    ])
    .unwrap();

    let http_client = reqwest::Client::builder()
        .timeout(test::image_client::TIMEOUT)
        .build()
        .unwrap();

    OpenAiImageClient::new(base_url, key_pool, http_client)
}
