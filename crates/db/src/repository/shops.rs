//! Shop stock lookups.

use tracing::{info, instrument};

use crate::provider::ConnectionProvider;
use crate::statement::in_placeholders;
use crate::{DbError, Row, Statement};

use super::fetch_rows;

/// Fetch the shops holding stock of the alcohols used by cocktails made with
/// one of `alcools`.
///
/// Columns: `NomMagasin, VilleMagasin, QteStock, EtatStock, NomCocktail,
/// Alcool, IngrédientsSupplémentaires, Préparation`.  Only rows whose stock
/// quantity is strictly positive are returned.
#[instrument(skip_all, fields(alcools = alcools.len()))]
pub async fn read_stocks_in_shops(
    provider: &dyn ConnectionProvider,
    alcools: &[String],
) -> Result<Vec<Row>, DbError> {
    let placeholders = in_placeholders(alcools.len())?;

    let statement = Statement::new(
        format!(
            r#"SELECT
    MAG.[NomMagasin],
    MAG.[VilleMagasin],
    SMAG.[QteStock],
    SMAG.[EtatStock],
    CD.[NomCocktail],
    CD.[Alcool],
    CD.[IngrédientsSupplémentaires],
    CD.[Préparation]
FROM [saq].[CocktailDetails] CD
LEFT JOIN [saq].[Cocktails] COK ON COK.[IDCocktail] = CD.[IDCocktail]
LEFT JOIN [saq].[ListAlcools] LA ON LA.[IDAlcool] = COK.[IDAlcool]
LEFT JOIN [saq].[Stocks_Alcool_Magasins] SMAG ON SMAG.[AlcoolID] = LA.[IDAlcool]
LEFT JOIN [saq].[Magasins] MAG ON MAG.[IDMagasin] = SMAG.[MagasinID]
WHERE CD.[Alcool] IN ({placeholders}) AND SMAG.[QteStock] > 0;"#
        ),
        alcools.to_vec(),
    );

    let rows = fetch_rows(provider, &statement).await?;
    info!("read_stocks_in_shops executed successfully ({} rows)", rows.len());
    Ok(rows)
}
