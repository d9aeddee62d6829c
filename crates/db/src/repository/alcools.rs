//! `ListAlcools` inserts.

use tracing::{info, instrument};

use crate::provider::ConnectionProvider;
use crate::{DbError, Statement};

use super::{added_message, execute_and_commit};

/// Insert one alcohol into `ListAlcools` and commit.
///
/// `IDAlcool` is `MAX(CAST(IDAlcool AS INTEGER)) + 1` rendered as text,
/// evaluated inside the insert.  This is not atomic: concurrent writers can
/// compute the same id, and whether that fails depends on the table's
/// constraints.
#[instrument(skip_all, fields(alcool = name))]
pub async fn write_alcool(
    provider: &dyn ConnectionProvider,
    name: &str,
    alcool_type: &str,
    degree: &str,
    country: &str,
) -> Result<String, DbError> {
    let next_id = provider.dialect().integer_to_text(
        "(SELECT MAX(CAST([IDAlcool] AS INTEGER)) + 1 FROM [saq].[ListAlcools])",
    );

    let statement = Statement::new(
        format!(
            "INSERT INTO [saq].[ListAlcools] (IDAlcool, NomAlcool, TypeAlcool, [Degré], Pays) \
             VALUES ({next_id}, ?, ?, ?, ?);"
        ),
        vec![
            name.to_owned(),
            alcool_type.to_owned(),
            degree.to_owned(),
            country.to_owned(),
        ],
    );

    execute_and_commit(provider, &statement).await?;
    info!("The {} was added to ListAlcools.", name);
    Ok(added_message(name))
}
