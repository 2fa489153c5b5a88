use std::{path::Path, sync::Arc};

use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use serde::Deserialize;
use tokio::sync::RwLock;

use team_portal::{
    app_state::{MemberStoreType, ProjectStoreType},
    domain::{
        ApplicationFields, ApplicationStore, CategoryTitle, Member,
        MemberApplication, MemberName, Project, ProjectName,
    },
    get_postgres_pool,
    services::data_stores::{
        PostgresApplicationStore, PostgresMemberStore, PostgresProjectStore,
    },
    utils::{
        constants, relations::sync_project_leaders, tracing::init_tracing,
    },
};

const USAGE: &str = "usage: data_importer <subcommand> <json-file>
subcommands:
    import_members
    import_member_categories
    import_member_applications
    import_project_descriptions";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [subcommand, json_file] = args.as_slice() else {
        bail!("{USAGE}");
    };

    let pool = get_postgres_pool(&constants::DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool!")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .wrap_err("Failed to run migrations")?;

    let member_store: MemberStoreType =
        Arc::new(RwLock::new(PostgresMemberStore::new(pool.clone())));
    let project_store: ProjectStoreType =
        Arc::new(RwLock::new(PostgresProjectStore::new(pool.clone())));
    let mut application_store = PostgresApplicationStore::new(pool);

    match subcommand.as_str() {
        "import_members" => {
            let records: Vec<MemberRecord> = read_json(json_file)?;
            import_members(&member_store, records).await
        }
        "import_member_categories" => {
            let records: Vec<CategoryRecord> = read_json(json_file)?;
            import_member_categories(&member_store, records).await
        }
        "import_member_applications" => {
            let records: Vec<ApplicationRecord> = read_json(json_file)?;
            import_member_applications(&mut application_store, records).await
        }
        "import_project_descriptions" => {
            let records: Vec<ProjectRecord> = read_json(json_file)?;
            import_project_descriptions(&member_store, &project_store, records)
                .await
        }
        unknown => bail!("Unknown subcommand: {unknown}\n{USAGE}"),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let contents = std::fs::read_to_string(Path::new(path))
        .wrap_err_with(|| format!("File {path} does not exist."))?;
    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("File {path} is not valid JSON."))
}

#[derive(Deserialize)]
struct MemberRecord {
    order: i32,
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    github: String,
    #[serde(rename = "linkedIn", default)]
    linked_in: String,
    image: Option<String>,
    #[serde(default)]
    category: Vec<String>,
}

/// Upsert keyed on display order, then replace the category relation.
/// Re-running the same file is a no-op.
async fn import_members(
    member_store: &MemberStoreType,
    records: Vec<MemberRecord>,
) -> Result<()> {
    for record in records {
        let name = MemberName::parse(record.name).map_err(|e| eyre!(e))?;
        let member = Member {
            order: record.order,
            name,
            title: record.title,
            email: record.email,
            github: record.github,
            linked_in: record.linked_in,
            image: record.image,
            categories: Vec::new(),
        };

        let categories = record
            .category
            .into_iter()
            .map(|title| CategoryTitle::parse(title).map_err(|e| eyre!(e)))
            .collect::<Result<Vec<_>>>()?;

        let mut store = member_store.write().await;
        store.upsert_member(&member).await.map_err(|e| eyre!(e))?;
        store
            .set_categories(member.order, &categories)
            .await
            .map_err(|e| eyre!(e))?;

        tracing::info!("Processed member {}", member.name.as_ref());
    }

    Ok(())
}

#[derive(Deserialize)]
struct CategoryRecord {
    title: String,
}

async fn import_member_categories(
    member_store: &MemberStoreType,
    records: Vec<CategoryRecord>,
) -> Result<()> {
    for record in records {
        let title = CategoryTitle::parse(record.title).map_err(|e| eyre!(e))?;
        member_store
            .write()
            .await
            .create_category(&title)
            .await
            .map_err(|e| eyre!(e))?;

        tracing::info!("Processed category {}", title.as_ref());
    }

    Ok(())
}

#[derive(Deserialize)]
struct ApplicationRecord {
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    about: Option<String>,
    projects_to_join: Option<serde_json::Value>,
    lead: Option<bool>,
}

/// Get-or-create keyed on applicant name so file re-runs do not pile up
/// duplicate rows, unlike the open intake endpoint.
async fn import_member_applications(
    application_store: &mut PostgresApplicationStore,
    records: Vec<ApplicationRecord>,
) -> Result<()> {
    for record in records {
        let existing = application_store
            .find_application_by_applicant(
                &record.first_name,
                &record.last_name,
            )
            .await
            .map_err(|e| eyre!(e))?;
        if existing.is_some() {
            tracing::info!(
                "Skipping existing application for {} {}",
                record.first_name,
                record.last_name
            );
            continue;
        }

        let fields = ApplicationFields::parse(
            &record.first_name,
            &record.last_name,
            &record.email,
            &record.phone_number,
            record.about,
            record.projects_to_join.as_ref(),
            record.lead,
        )
        .map_err(|e| eyre!(e))?;
        let application = MemberApplication::new(fields);

        application_store
            .add_application(&application)
            .await
            .map_err(|e| eyre!(e))?;

        tracing::info!(
            "Processed application for {} {}",
            application.first_name,
            application.last_name
        );
    }

    Ok(())
}

#[derive(Deserialize)]
struct ProjectRecord {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "image")]
    logo: String,
    #[serde(default)]
    hours_a_week: i32,
    github_link: Option<String>,
    #[serde(default)]
    leaders: Vec<String>,
}

/// Upsert keyed on name, then replace the leader relation. Leader
/// emails that match no member are logged and skipped, same as the
/// creation endpoint.
async fn import_project_descriptions(
    member_store: &MemberStoreType,
    project_store: &ProjectStoreType,
    records: Vec<ProjectRecord>,
) -> Result<()> {
    for record in records {
        let project_name =
            ProjectName::parse(&record.name).map_err(|e| eyre!(e))?;
        let project = Project::new(
            project_name.clone(),
            record.description,
            record.logo,
            record.hours_a_week,
            record.github_link,
        );

        project_store
            .write()
            .await
            .upsert_project(&project)
            .await
            .map_err(|e| eyre!(e))?;

        let leaders_not_found = sync_project_leaders(
            member_store,
            project_store,
            &project_name,
            &record.leaders,
        )
        .await
        .map_err(|e| eyre!(e))?;

        for email in leaders_not_found {
            tracing::warn!("Leader with email {email} does not exist.");
        }

        tracing::info!("Processed project {}", project_name.as_ref());
    }

    Ok(())
}
