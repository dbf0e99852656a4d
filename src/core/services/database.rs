use super::{match_alias, records_per_dimension, PricingService};
use crate::domain::model::{
    Filter, PriceRecord, ProductDocument, QueryParameters, RecordDetails, FIELD_INSTANCE_TYPE,
    FIELD_LOCATION,
};

pub const DEFAULT_DATABASE_ENGINE: &str = "MySQL";

/// Aurora 需排在 MySQL / PostgreSQL 之前
const DATABASE_ENGINES: &[(&str, &[&str])] = &[
    (
        "Aurora PostgreSQL",
        &["aurora postgres", "aurorapostgres"],
    ),
    ("Aurora MySQL", &["aurora"]),
    ("MariaDB", &["mariadb", "maria"]),
    ("PostgreSQL", &["postgres", "pgsql"]),
    ("MySQL", &["mysql"]),
    ("Oracle", &["oracle", "甲骨文"]),
    ("SQL Server", &["sql server", "sqlserver", "mssql"]),
];

/// RDS 關聯式資料庫
pub struct RelationalDatabase;

/// 有提供但無法辨識的引擎一律視為 MySQL
pub fn normalize_database_engine(token: &str) -> &'static str {
    match_alias(token, DATABASE_ENGINES).unwrap_or(DEFAULT_DATABASE_ENGINE)
}

impl PricingService for RelationalDatabase {
    fn build_filters(&self, params: &QueryParameters, region: Option<&str>) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(location) = region {
            filters.push(Filter::optional(FIELD_LOCATION, location));
        }

        if let Some(engine) = params.database_engine() {
            filters.push(Filter::optional(
                "databaseEngine",
                normalize_database_engine(engine),
            ));
        }

        if let Some(instance_type) = params.instance_type() {
            filters.push(Filter::optional(FIELD_INSTANCE_TYPE, instance_type));
        }

        filters
    }

    fn extract_records(&self, document: &ProductDocument) -> Vec<PriceRecord> {
        records_per_dimension(document, || RecordDetails::Database {
            database_engine: document.attribute_or_na("databaseEngine"),
            instance_type: document.attribute_or_na("instanceType"),
            deployment_option: document.attribute_or_na("deploymentOption"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_normalization() {
        assert_eq!(normalize_database_engine("aurora-postgresql"), "Aurora PostgreSQL");
        assert_eq!(normalize_database_engine("Aurora MySQL"), "Aurora MySQL");
        assert_eq!(normalize_database_engine("Postgres 15"), "PostgreSQL");
        assert_eq!(normalize_database_engine("MS SQL Server"), "SQL Server");
        assert_eq!(normalize_database_engine("mariadb"), "MariaDB");
        assert_eq!(normalize_database_engine("oracle-se2"), "Oracle");
        assert_eq!(normalize_database_engine("cassandra"), "MySQL");
    }

    #[test]
    fn test_filter_order() {
        let params = QueryParameters {
            database_engine: Some("postgresql".to_string()),
            instance_type: Some("db.t3.micro".to_string()),
            ..Default::default()
        };
        let filters = RelationalDatabase.build_filters(&params, Some("EU (Ireland)"));
        let pairs: Vec<(&str, &str)> = filters
            .iter()
            .map(|f| (f.field.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("location", "EU (Ireland)"),
                ("databaseEngine", "PostgreSQL"),
                ("instanceType", "db.t3.micro"),
            ]
        );
    }

    #[test]
    fn test_no_engine_token_means_no_engine_filter() {
        let filters = RelationalDatabase.build_filters(&QueryParameters::default(), None);
        assert!(filters.is_empty());
    }
}
