//! The four SAQ functions, bound to the `SAQSQLDatabase` connection.
//!
//! Argument names are the ones callers already use (`NomAlcool`, `Degré`, …);
//! unknown or missing arguments are rejected before any connection is opened.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use db::repository;
use db::ConnectionProvider;

use crate::{FunctionError, FunctionRegistry, Parameter, UserDataFunction};

/// Connection alias every SAQ function binds to.
pub const SAQ_CONNECTION_ALIAS: &str = "SAQSQLDatabase";

/// Register all four SAQ functions.
pub fn register_saq_functions(registry: &mut FunctionRegistry) {
    registry.register(Arc::new(ReadCocktails));
    registry.register(Arc::new(ReadStocksInShops));
    registry.register(Arc::new(WriteAlcool));
    registry.register(Arc::new(WriteCocktailDetails));
}

fn decode<T: DeserializeOwned>(function: &str, args: Value) -> Result<T, FunctionError> {
    serde_json::from_value(args).map_err(|source| FunctionError::InvalidArguments {
        function: function.to_owned(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Argument lists
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlcoolsArgs {
    alcools: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WriteAlcoolArgs {
    #[serde(rename = "NomAlcool")]
    name: String,
    #[serde(rename = "TypeAlcool")]
    alcool_type: String,
    #[serde(rename = "Degré")]
    degree: String,
    #[serde(rename = "Pays")]
    country: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WriteCocktailDetailsArgs {
    #[serde(rename = "NomCocktail")]
    cocktail_name: String,
    #[serde(rename = "Alcool")]
    alcohol_name: String,
    #[serde(rename = "IDAlcool")]
    alcohol_id: String,
    #[serde(rename = "IngrédientsSupplémentaires")]
    extra_ingredients: String,
    #[serde(rename = "Préparation")]
    preparation: String,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

pub struct ReadCocktails;

#[async_trait]
impl UserDataFunction for ReadCocktails {
    fn name(&self) -> &'static str {
        "read_cocktails"
    }

    fn connection_alias(&self) -> &'static str {
        SAQ_CONNECTION_ALIAS
    }

    fn parameters(&self) -> &'static [Parameter] {
        const PARAMS: &[Parameter] = &[Parameter::text_list("alcools")];
        PARAMS
    }

    async fn invoke(
        &self,
        provider: &dyn ConnectionProvider,
        args: Value,
    ) -> Result<Value, FunctionError> {
        let args: AlcoolsArgs = decode(self.name(), args)?;
        let rows = repository::read_cocktails(provider, &args.alcools).await?;
        Ok(serde_json::to_value(rows)?)
    }
}

pub struct ReadStocksInShops;

#[async_trait]
impl UserDataFunction for ReadStocksInShops {
    fn name(&self) -> &'static str {
        "read_stocks_in_shops"
    }

    fn connection_alias(&self) -> &'static str {
        SAQ_CONNECTION_ALIAS
    }

    fn parameters(&self) -> &'static [Parameter] {
        const PARAMS: &[Parameter] = &[Parameter::text_list("alcools")];
        PARAMS
    }

    async fn invoke(
        &self,
        provider: &dyn ConnectionProvider,
        args: Value,
    ) -> Result<Value, FunctionError> {
        let args: AlcoolsArgs = decode(self.name(), args)?;
        let rows = repository::read_stocks_in_shops(provider, &args.alcools).await?;
        Ok(serde_json::to_value(rows)?)
    }
}

pub struct WriteAlcool;

#[async_trait]
impl UserDataFunction for WriteAlcool {
    fn name(&self) -> &'static str {
        "write_alcool"
    }

    fn connection_alias(&self) -> &'static str {
        SAQ_CONNECTION_ALIAS
    }

    fn parameters(&self) -> &'static [Parameter] {
        const PARAMS: &[Parameter] = &[
            Parameter::text("NomAlcool"),
            Parameter::text("TypeAlcool"),
            Parameter::text("Degré"),
            Parameter::text("Pays"),
        ];
        PARAMS
    }

    async fn invoke(
        &self,
        provider: &dyn ConnectionProvider,
        args: Value,
    ) -> Result<Value, FunctionError> {
        let args: WriteAlcoolArgs = decode(self.name(), args)?;
        let message = repository::write_alcool(
            provider,
            &args.name,
            &args.alcool_type,
            &args.degree,
            &args.country,
        )
        .await?;
        Ok(Value::String(message))
    }
}

pub struct WriteCocktailDetails;

#[async_trait]
impl UserDataFunction for WriteCocktailDetails {
    fn name(&self) -> &'static str {
        "write_cocktaildetails"
    }

    fn connection_alias(&self) -> &'static str {
        SAQ_CONNECTION_ALIAS
    }

    fn parameters(&self) -> &'static [Parameter] {
        const PARAMS: &[Parameter] = &[
            Parameter::text("NomCocktail"),
            Parameter::text("Alcool"),
            Parameter::text("IDAlcool"),
            Parameter::text("IngrédientsSupplémentaires"),
            Parameter::text("Préparation"),
        ];
        PARAMS
    }

    async fn invoke(
        &self,
        provider: &dyn ConnectionProvider,
        args: Value,
    ) -> Result<Value, FunctionError> {
        let args: WriteCocktailDetailsArgs = decode(self.name(), args)?;
        let message = repository::write_cocktaildetails(
            provider,
            &args.cocktail_name,
            &args.alcohol_name,
            &args.alcohol_id,
            &args.extra_ingredients,
            &args.preparation,
        )
        .await?;
        Ok(Value::String(message))
    }
}
