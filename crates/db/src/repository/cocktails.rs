//! Cocktail reads and cocktail-detail inserts.

use tracing::{info, instrument};

use crate::provider::ConnectionProvider;
use crate::statement::in_placeholders;
use crate::{DbError, Row, Statement};

use super::{added_message, execute_and_commit, fetch_rows};

/// Fetch every cocktail whose detail row uses one of `alcools`.
///
/// Columns: `NomCocktail, Alcool, IngrédientsSupplémentaires, Préparation`.
/// Rows come back in whatever order the database produces.
///
/// # Errors
/// [`DbError::EmptyInList`] when `alcools` is empty; otherwise whatever the
/// driver reports.
#[instrument(skip_all, fields(alcools = alcools.len()))]
pub async fn read_cocktails(
    provider: &dyn ConnectionProvider,
    alcools: &[String],
) -> Result<Vec<Row>, DbError> {
    let placeholders = in_placeholders(alcools.len())?;

    let statement = Statement::new(
        format!(
            r#"SELECT
    CD.NomCocktail,
    CD.Alcool,
    CD.[IngrédientsSupplémentaires],
    CD.[Préparation]
FROM [saq].[CocktailDetails] CD
INNER JOIN [saq].[Cocktails] COK ON COK.[IDCocktail] = CD.[IDCocktail]
WHERE CD.[Alcool] IN ({placeholders});"#
        ),
        alcools.to_vec(),
    );

    let rows = fetch_rows(provider, &statement).await?;
    info!("read_cocktails executed successfully ({} rows)", rows.len());
    Ok(rows)
}

/// Insert one row into `CocktailDetails`.
///
/// `IDCocktail` is computed in the statement as one plus the largest
/// integer-cast id already present.  Two concurrent writers can compute the
/// same id; nothing here prevents it.
#[instrument(skip_all, fields(cocktail = cocktail_name))]
pub async fn write_cocktaildetails(
    provider: &dyn ConnectionProvider,
    cocktail_name: &str,
    alcohol_name: &str,
    alcohol_id: &str,
    extra_ingredients: &str,
    preparation: &str,
) -> Result<String, DbError> {
    let next_id = provider.dialect().integer_to_text(
        "(SELECT MAX(CAST([IDCocktail] AS INTEGER)) + 1 FROM [saq].[CocktailDetails])",
    );

    let statement = Statement::new(
        format!(
            "INSERT INTO [saq].[CocktailDetails] \
             (IDCocktail, NomCocktail, Alcool, IDAlcool, [IngrédientsSupplémentaires], [Préparation]) \
             VALUES ({next_id}, ?, ?, ?, ?, ?);"
        ),
        vec![
            cocktail_name.to_owned(),
            alcohol_name.to_owned(),
            alcohol_id.to_owned(),
            extra_ingredients.to_owned(),
            preparation.to_owned(),
        ],
    );

    execute_and_commit(provider, &statement).await?;
    info!("The {} was added to CocktailDetails.", cocktail_name);
    Ok(added_message(cocktail_name))
}
