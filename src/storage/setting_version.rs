//! Pipeline setting version operations.
//!
//! Every operation takes the executor to run on: a pool, a pooled
//! connection, or `&mut *tx` for an open transaction. Each issues exactly
//! one statement and never begins, commits or rolls back a transaction.

#![allow(clippy::missing_errors_doc, clippy::unused_self)]

use std::collections::HashSet;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

use super::conditions::Conditions;
use super::types::PipelineSettingVersionRecord;
use crate::config::SettingDefaults;
use crate::error::StorageError;
use crate::setting::PipelineSetting;

const TABLE: &str = "pipeline_setting_version";

const SELECT_COLUMNS: &str = "SELECT project_id, pipeline_id, version, name, description, \
    run_lock_type, success_receiver, fail_receiver, success_group, fail_group, success_type, \
    fail_type, success_wechat_group_flag, success_wechat_group, fail_wechat_group_flag, \
    fail_wechat_group, success_detail_flag, fail_detail_flag, success_content, fail_content, \
    wait_queue_time_second, max_queue_size, is_template FROM pipeline_setting_version";

const INSERT_SQL: &str = "INSERT INTO pipeline_setting_version (project_id, pipeline_id, version, \
    name, description, run_lock_type, success_receiver, fail_receiver, success_group, fail_group, \
    success_type, fail_type, success_wechat_group_flag, success_wechat_group, \
    fail_wechat_group_flag, fail_wechat_group, success_detail_flag, fail_detail_flag, \
    success_content, fail_content, wait_queue_time_second, max_queue_size, is_template) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Data access for the `pipeline_setting_version` table.
///
/// Holds only the seed values for [`insert_new_setting`](Self::insert_new_setting).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSettingVersionDao {
    defaults: SettingDefaults,
}

impl PipelineSettingVersionDao {
    /// Create a DAO seeding new pipelines with `defaults`.
    #[must_use]
    pub const fn new(defaults: SettingDefaults) -> Self {
        Self { defaults }
    }

    /// Seed values used for new pipelines.
    #[must_use]
    pub const fn defaults(&self) -> &SettingDefaults {
        &self.defaults
    }

    /// Insert the default settings row of a newly created pipeline.
    ///
    /// Fails with [`StorageError::ConstraintViolation`] if the version
    /// already exists.
    pub async fn insert_new_setting<'e, E>(
        &self,
        executor: E,
        project_id: &str,
        pipeline_id: &str,
        pipeline_name: &str,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let record = PipelineSettingVersionRecord::with_defaults(
            project_id,
            pipeline_id,
            pipeline_name,
            version,
            is_template,
            &self.defaults,
        )?;
        let rows = Self::insert_record(executor, &record).await?;

        tracing::debug!(
            project_id,
            pipeline_id,
            version,
            is_template,
            rows,
            "Inserted default pipeline setting"
        );
        Ok(rows)
    }

    /// Insert a row built entirely from `setting`.
    ///
    /// The caller picks `version`; nothing is read or incremented here.
    /// A wait time whose seconds overflow the column fails with
    /// [`StorageError::InvalidData`] and writes nothing.
    pub async fn save_setting<'e, E>(
        &self,
        executor: E,
        setting: &PipelineSetting,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let record = PipelineSettingVersionRecord::from_setting(setting, version, is_template)?;
        let rows = Self::insert_record(executor, &record).await?;

        tracing::debug!(
            pipeline_id = %setting.pipeline_id,
            version,
            is_template,
            rows,
            "Saved pipeline setting version"
        );
        Ok(rows)
    }

    /// Get one version of a pipeline's settings.
    pub async fn get_setting<'e, E>(
        &self,
        executor: E,
        pipeline_id: &str,
        version: i32,
    ) -> Result<Option<PipelineSettingVersionRecord>, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let conditions = Conditions::new()
            .eq("pipeline_id", pipeline_id)
            .eq("version", version);
        let sql = format!("{SELECT_COLUMNS}{}", conditions.where_sql());

        let row = conditions
            .bind_to(sqlx::query(&sql))
            .fetch_optional(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("SELECT pipeline_setting_version", &e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    /// Get every version of every pipeline in `pipeline_ids`.
    ///
    /// Each id is bound as its own parameter. Lists longer than `SQLite`'s
    /// variable limit (32766 by default) fail with
    /// [`StorageError::QueryFailed`]; callers split them.
    pub async fn get_settings<'e, E>(
        &self,
        executor: E,
        pipeline_ids: &HashSet<String>,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        self.fetch_by_pipeline_ids(executor, pipeline_ids).await
    }

    /// Same as [`get_settings`](Self::get_settings) for a list that may
    /// contain duplicates. Each matching row is returned once.
    ///
    /// Each id is bound as its own parameter. Lists longer than `SQLite`'s
    /// variable limit (32766 by default) fail with
    /// [`StorageError::QueryFailed`]; callers split them.
    pub async fn get_settings_in<'e, E>(
        &self,
        executor: E,
        pipeline_ids: &[String],
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        self.fetch_by_pipeline_ids(executor, pipeline_ids).await
    }

    /// Rows in `project_id` named `name` with the given template flag,
    /// excluding `exclude_pipeline_id` when it is present and not blank.
    pub async fn get_settings_by_name<'e, E>(
        &self,
        executor: E,
        project_id: &str,
        name: &str,
        exclude_pipeline_id: Option<&str>,
        is_template: bool,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let conditions = Self::name_conditions(project_id, name, exclude_pipeline_id, is_template);
        let sql = format!("{SELECT_COLUMNS}{}", conditions.where_sql());

        let rows = conditions
            .bind_to(sqlx::query(&sql))
            .fetch_all(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("SELECT pipeline_setting_version", &e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Rename every version of each pipeline in `pipeline_ids`.
    ///
    /// Each id is bound as its own parameter. Lists longer than `SQLite`'s
    /// variable limit (32766 by default) fail with
    /// [`StorageError::QueryFailed`]; callers split them.
    pub async fn update_setting_name<'e, E>(
        &self,
        executor: E,
        pipeline_ids: &[String],
        name: &str,
    ) -> Result<(), StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let conditions = Conditions::new().in_list("pipeline_id", pipeline_ids);
        let sql = format!("UPDATE {TABLE} SET name = ?{}", conditions.where_sql());

        let result = conditions
            .bind_to(sqlx::query(&sql).bind(name))
            .execute(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("UPDATE pipeline_setting_version", &e))?;

        tracing::debug!(
            pipelines = pipeline_ids.len(),
            rows = result.rows_affected(),
            "Updated pipeline setting names"
        );
        Ok(())
    }

    /// Set name and description on every version of a pipeline.
    pub async fn update_setting<'e, E>(
        &self,
        executor: E,
        pipeline_id: &str,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let conditions = Conditions::new().eq("pipeline_id", pipeline_id);
        self.update_name_and_desc(executor, &conditions, name, desc)
            .await
    }

    /// Set name and description on a single version of a pipeline.
    pub async fn update_setting_version<'e, E>(
        &self,
        executor: E,
        pipeline_id: &str,
        version: i32,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let conditions = Conditions::new()
            .eq("pipeline_id", pipeline_id)
            .eq("version", version);
        self.update_name_and_desc(executor, &conditions, name, desc)
            .await
    }

    /// Count rows matching the same filters as
    /// [`get_settings_by_name`](Self::get_settings_by_name), excluding
    /// `pipeline_id`.
    pub async fn count_settings_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
        project_id: &str,
        pipeline_id: &str,
        is_template: bool,
    ) -> Result<i64, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let conditions = Self::name_conditions(project_id, name, Some(pipeline_id), is_template);
        let sql = format!("SELECT COUNT(*) AS count FROM {TABLE}{}", conditions.where_sql());

        let row = conditions
            .bind_to(sqlx::query(&sql))
            .fetch_one(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("COUNT pipeline_setting_version", &e))?;

        row.try_get("count")
            .map_err(|e| StorageError::from_sqlx("COUNT pipeline_setting_version", &e))
    }

    /// Delete every version of a pipeline.
    pub async fn delete<'e, E>(&self, executor: E, pipeline_id: &str) -> Result<u64, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let conditions = Conditions::new().eq("pipeline_id", pipeline_id);
        let sql = format!("DELETE FROM {TABLE}{}", conditions.where_sql());

        let result = conditions
            .bind_to(sqlx::query(&sql))
            .execute(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("DELETE pipeline_setting_version", &e))?;

        let rows = result.rows_affected();
        tracing::debug!(pipeline_id, rows, "Deleted pipeline setting versions");
        Ok(rows)
    }

    fn name_conditions(
        project_id: &str,
        name: &str,
        exclude_pipeline_id: Option<&str>,
        is_template: bool,
    ) -> Conditions {
        Conditions::new()
            .eq("project_id", project_id)
            .eq("name", name)
            .eq("is_template", is_template)
            .ne_if_present("pipeline_id", exclude_pipeline_id)
    }

    async fn fetch_by_pipeline_ids<'e, E, S>(
        &self,
        executor: E,
        pipeline_ids: impl IntoIterator<Item = S>,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError>
    where
        E: SqliteExecutor<'e>,
        S: AsRef<str>,
    {
        let conditions = Conditions::new().in_list("pipeline_id", pipeline_ids);
        let sql = format!("{SELECT_COLUMNS}{}", conditions.where_sql());

        let rows = conditions
            .bind_to(sqlx::query(&sql))
            .fetch_all(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("SELECT pipeline_setting_version", &e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn update_name_and_desc<'e, E>(
        &self,
        executor: E,
        conditions: &Conditions,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            "UPDATE {TABLE} SET name = ?, description = ?{}",
            conditions.where_sql()
        );

        let result = conditions
            .bind_to(sqlx::query(&sql).bind(name).bind(desc))
            .execute(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("UPDATE pipeline_setting_version", &e))?;

        tracing::debug!(
            rows = result.rows_affected(),
            "Updated pipeline setting name and description"
        );
        Ok(())
    }

    async fn insert_record<'e, E>(
        executor: E,
        record: &PipelineSettingVersionRecord,
    ) -> Result<u64, StorageError>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(INSERT_SQL)
            .bind(&record.project_id)
            .bind(&record.pipeline_id)
            .bind(record.version)
            .bind(&record.name)
            .bind(&record.desc)
            .bind(record.run_lock_type)
            .bind(&record.success_receiver)
            .bind(&record.fail_receiver)
            .bind(&record.success_group)
            .bind(&record.fail_group)
            .bind(&record.success_type)
            .bind(&record.fail_type)
            .bind(record.success_wechat_group_flag)
            .bind(&record.success_wechat_group)
            .bind(record.fail_wechat_group_flag)
            .bind(&record.fail_wechat_group)
            .bind(record.success_detail_flag)
            .bind(record.fail_detail_flag)
            .bind(&record.success_content)
            .bind(&record.fail_content)
            .bind(record.wait_queue_time_second)
            .bind(record.max_queue_size)
            .bind(record.is_template)
            .execute(executor)
            .await
            .map_err(|e| StorageError::from_sqlx("INSERT pipeline_setting_version", &e))?;

        Ok(result.rows_affected())
    }

    /// Convert a database row to a [`PipelineSettingVersionRecord`].
    fn row_to_record(row: &SqliteRow) -> Result<PipelineSettingVersionRecord, StorageError> {
        let decode = |e: sqlx::Error| StorageError::InvalidData {
            message: format!("Failed to decode pipeline setting row: {e}"),
        };

        Ok(PipelineSettingVersionRecord {
            project_id: row.try_get("project_id").map_err(decode)?,
            pipeline_id: row.try_get("pipeline_id").map_err(decode)?,
            version: row.try_get("version").map_err(decode)?,
            name: row.try_get("name").map_err(decode)?,
            desc: row.try_get("description").map_err(decode)?,
            run_lock_type: row.try_get("run_lock_type").map_err(decode)?,
            success_receiver: row.try_get("success_receiver").map_err(decode)?,
            fail_receiver: row.try_get("fail_receiver").map_err(decode)?,
            success_group: row.try_get("success_group").map_err(decode)?,
            fail_group: row.try_get("fail_group").map_err(decode)?,
            success_type: row.try_get("success_type").map_err(decode)?,
            fail_type: row.try_get("fail_type").map_err(decode)?,
            success_wechat_group_flag: row.try_get("success_wechat_group_flag").map_err(decode)?,
            success_wechat_group: row.try_get("success_wechat_group").map_err(decode)?,
            fail_wechat_group_flag: row.try_get("fail_wechat_group_flag").map_err(decode)?,
            fail_wechat_group: row.try_get("fail_wechat_group").map_err(decode)?,
            success_detail_flag: row.try_get("success_detail_flag").map_err(decode)?,
            fail_detail_flag: row.try_get("fail_detail_flag").map_err(decode)?,
            success_content: row.try_get("success_content").map_err(decode)?,
            fail_content: row.try_get("fail_content").map_err(decode)?,
            wait_queue_time_second: row.try_get("wait_queue_time_second").map_err(decode)?,
            max_queue_size: row.try_get("max_queue_size").map_err(decode)?,
            is_template: row.try_get("is_template").map_err(decode)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::START_USER_RECEIVER;
    use crate::setting::{NotifyType, RunLockType, Subscription};
    use crate::storage::core::tests::test_storage;
    use serial_test::serial;

    fn sample_setting(pipeline_id: &str) -> PipelineSetting {
        PipelineSetting::new("proj", pipeline_id, "Deploy")
            .with_desc("ships it")
            .with_run_lock_type(RunLockType::SingleLock)
            .with_subscriptions(
                Subscription::new("alice,bob")
                    .with_types(vec![NotifyType::Email, NotifyType::Wework])
                    .with_groups(["dev", "ops"])
                    .with_content("yay"),
                Subscription::new("carol")
                    .with_types(vec![NotifyType::Sms])
                    .with_wechat_group("wg-1")
                    .with_detail(true)
                    .with_content("boo"),
            )
            .with_queue(30, 25)
    }

    #[tokio::test]
    #[serial]
    async fn test_insert_new_setting_seeds_defaults() {
        let storage = test_storage().await;
        let dao = storage.dao();

        let rows = dao
            .insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .expect("insert");
        assert_eq!(rows, 1);

        let record = dao
            .get_setting(&storage.pool, "P1", 1)
            .await
            .expect("get")
            .expect("row exists");
        assert_eq!(record.name, "Build");
        assert_eq!(record.run_lock_type, RunLockType::Multiple.code());
        assert_eq!(record.success_receiver, START_USER_RECEIVER);
        assert_eq!(record.fail_receiver, START_USER_RECEIVER);
        assert_eq!(record.max_queue_size, dao.defaults().max_queue_size);
        assert_eq!(record.wait_queue_time_second, 60);
        assert!(!record.success_wechat_group_flag);
    }

    #[tokio::test]
    #[serial]
    async fn test_insert_duplicate_version_is_constraint_violation() {
        let storage = test_storage().await;
        let dao = storage.dao();

        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .expect("first insert");
        let result = dao
            .insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await;

        assert!(matches!(
            result,
            Err(StorageError::ConstraintViolation { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_save_setting_roundtrip() {
        let storage = test_storage().await;
        let dao = storage.dao();
        let setting = sample_setting("P1");

        let rows = dao
            .save_setting(&storage.pool, &setting, 3, false)
            .await
            .expect("save");
        assert_eq!(rows, 1);

        let record = dao
            .get_setting(&storage.pool, "P1", 3)
            .await
            .expect("get")
            .expect("row exists");
        assert_eq!(record.success_group, "dev,ops");
        assert_eq!(record.success_type, "EMAIL,WEWORK");
        assert_eq!(record.wait_queue_time_second, 1800);
        assert_eq!(record.to_setting().expect("decode"), setting);
    }

    #[tokio::test]
    #[serial]
    async fn test_save_setting_appends_versions() {
        let storage = test_storage().await;
        let dao = storage.dao();
        let setting = sample_setting("P1");

        dao.save_setting(&storage.pool, &setting, 1, false)
            .await
            .expect("v1");
        dao.save_setting(&storage.pool, &setting.clone().with_desc("v2"), 2, false)
            .await
            .expect("v2");

        let v1 = dao.get_setting(&storage.pool, "P1", 1).await.unwrap().unwrap();
        let v2 = dao.get_setting(&storage.pool, "P1", 2).await.unwrap().unwrap();
        assert_eq!(v1.desc, "ships it");
        assert_eq!(v2.desc, "v2");
    }

    #[tokio::test]
    #[serial]
    async fn test_get_setting_missing_is_none() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();

        assert!(dao.get_setting(&storage.pool, "P1", 2).await.unwrap().is_none());
        assert!(dao.get_setting(&storage.pool, "P9", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_get_settings_ignores_missing_ids() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 2, false)
            .await
            .unwrap();

        let ids: HashSet<String> = ["P1".to_string(), "P2".to_string()].into();
        let records = dao.get_settings(&storage.pool, &ids).await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.pipeline_id == "P1"));
    }

    #[tokio::test]
    #[serial]
    async fn test_get_settings_in_matches_set_variant() {
        let storage = test_storage().await;
        let dao = storage.dao();
        for id in ["P1", "P2", "P3"] {
            dao.insert_new_setting(&storage.pool, "proj", id, id, 1, false)
                .await
                .unwrap();
        }

        let list = vec!["P1".to_string(), "P2".to_string(), "P1".to_string()];
        let set: HashSet<String> = list.iter().cloned().collect();

        let mut from_list = dao.get_settings_in(&storage.pool, &list).await.unwrap();
        let mut from_set = dao.get_settings(&storage.pool, &set).await.unwrap();
        from_list.sort_by(|a, b| a.pipeline_id.cmp(&b.pipeline_id));
        from_set.sort_by(|a, b| a.pipeline_id.cmp(&b.pipeline_id));

        assert_eq!(from_list.len(), 2);
        assert_eq!(from_list, from_set);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_settings_empty_input() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();

        let records = dao.get_settings_in(&storage.pool, &[]).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_get_settings_by_name_excludes_pipeline() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "proj", "P2", "Build", 1, false)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "other", "P3", "Build", 1, false)
            .await
            .unwrap();

        let all = dao
            .get_settings_by_name(&storage.pool, "proj", "Build", None, false)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let others = dao
            .get_settings_by_name(&storage.pool, "proj", "Build", Some("P1"), false)
            .await
            .unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].pipeline_id, "P2");
    }

    #[tokio::test]
    #[serial]
    async fn test_get_settings_by_name_blank_exclusion_is_ignored() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();

        let records = dao
            .get_settings_by_name(&storage.pool, "proj", "Build", Some("  "), false)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_settings_by_name_scoped_by_template_flag() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "T1", "Build", 1, true)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();

        let templates = dao
            .get_settings_by_name(&storage.pool, "proj", "Build", None, true)
            .await
            .unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].pipeline_id, "T1");
        assert!(templates[0].is_template);
    }

    #[tokio::test]
    #[serial]
    async fn test_update_setting_name_bulk() {
        let storage = test_storage().await;
        let dao = storage.dao();
        for (id, version) in [("P1", 1), ("P1", 2), ("P2", 1), ("P3", 1)] {
            dao.insert_new_setting(&storage.pool, "proj", id, "Old", version, false)
                .await
                .unwrap();
        }

        dao.update_setting_name(
            &storage.pool,
            &["P1".to_string(), "P2".to_string()],
            "FromTemplate",
        )
        .await
        .unwrap();

        for (id, version) in [("P1", 1), ("P1", 2), ("P2", 1)] {
            let record = dao
                .get_setting(&storage.pool, id, version)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(record.name, "FromTemplate");
        }
        let untouched = dao.get_setting(&storage.pool, "P3", 1).await.unwrap().unwrap();
        assert_eq!(untouched.name, "Old");
    }

    #[tokio::test]
    #[serial]
    async fn test_update_setting_name_empty_list_is_noop() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Old", 1, false)
            .await
            .unwrap();

        let result = dao.update_setting_name(&storage.pool, &[], "New").await;
        assert!(result.is_ok());

        let record = dao.get_setting(&storage.pool, "P1", 1).await.unwrap().unwrap();
        assert_eq!(record.name, "Old");
    }

    #[tokio::test]
    #[serial]
    async fn test_update_setting_touches_all_versions() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 2, false)
            .await
            .unwrap();

        dao.update_setting(&storage.pool, "P1", "Build2", "desc")
            .await
            .unwrap();

        for version in [1, 2] {
            let record = dao
                .get_setting(&storage.pool, "P1", version)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(record.name, "Build2");
            assert_eq!(record.desc, "desc");
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_update_setting_version_touches_one_version() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 2, false)
            .await
            .unwrap();

        dao.update_setting_version(&storage.pool, "P1", 2, "Renamed", "only v2")
            .await
            .unwrap();

        let v1 = dao.get_setting(&storage.pool, "P1", 1).await.unwrap().unwrap();
        let v2 = dao.get_setting(&storage.pool, "P1", 2).await.unwrap().unwrap();
        assert_eq!(v1.name, "Build");
        assert_eq!(v2.name, "Renamed");
        assert_eq!(v2.desc, "only v2");
    }

    #[tokio::test]
    #[serial]
    async fn test_count_settings_by_name_matches_rows() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "proj", "P2", "Build", 1, false)
            .await
            .unwrap();
        dao.insert_new_setting(&storage.pool, "proj", "P2", "Build", 2, false)
            .await
            .unwrap();

        for exclude in ["P1", "P2", "P9", ""] {
            let count = dao
                .count_settings_by_name(&storage.pool, "Build", "proj", exclude, false)
                .await
                .unwrap();
            let rows = dao
                .get_settings_by_name(&storage.pool, "proj", "Build", Some(exclude), false)
                .await
                .unwrap();
            assert_eq!(usize::try_from(count).unwrap(), rows.len(), "exclude={exclude}");
        }

        let count = dao
            .count_settings_by_name(&storage.pool, "Build", "proj", "P1", false)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_removes_all_versions() {
        let storage = test_storage().await;
        let dao = storage.dao();
        for version in 1..=3 {
            dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", version, false)
                .await
                .unwrap();
        }
        dao.insert_new_setting(&storage.pool, "proj", "P2", "Build", 1, false)
            .await
            .unwrap();

        let rows = dao.delete(&storage.pool, "P1").await.unwrap();
        assert_eq!(rows, 3);

        for version in 1..=3 {
            assert!(dao
                .get_setting(&storage.pool, "P1", version)
                .await
                .unwrap()
                .is_none());
        }
        assert!(dao.get_setting(&storage.pool, "P2", 1).await.unwrap().is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_missing_pipeline_affects_nothing() {
        let storage = test_storage().await;
        let rows = storage.dao().delete(&storage.pool, "nope").await.unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_operations_run_inside_caller_transaction() {
        let storage = test_storage().await;
        let dao = storage.dao();

        let mut tx = storage.begin().await.unwrap();
        dao.insert_new_setting(&mut *tx, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();
        let inside = dao.get_setting(&mut *tx, "P1", 1).await.unwrap();
        assert!(inside.is_some());
        tx.rollback().await.unwrap();

        assert!(dao.get_setting(&storage.pool, "P1", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_committed_transaction_persists() {
        let storage = test_storage().await;
        let dao = storage.dao();

        let mut tx = storage.begin().await.unwrap();
        dao.save_setting(&mut *tx, &sample_setting("P1"), 1, false)
            .await
            .unwrap();
        dao.update_setting_version(&mut *tx, "P1", 1, "Committed", "")
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let record = dao.get_setting(&storage.pool, "P1", 1).await.unwrap().unwrap();
        assert_eq!(record.name, "Committed");
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_stored_code_surfaces_on_decode() {
        let storage = test_storage().await;
        let dao = storage.dao();
        dao.insert_new_setting(&storage.pool, "proj", "P1", "Build", 1, false)
            .await
            .unwrap();
        sqlx::query("UPDATE pipeline_setting_version SET run_lock_type = 99")
            .execute(&storage.pool)
            .await
            .unwrap();

        let record = dao.get_setting(&storage.pool, "P1", 1).await.unwrap().unwrap();
        assert_eq!(record.run_lock_type, 99);
        assert!(matches!(
            record.to_setting(),
            Err(StorageError::InvalidData { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_save_rejects_wait_time_overflow_before_insert() {
        let storage = test_storage().await;
        let dao = storage.dao();
        let setting = PipelineSetting::new("proj", "P1", "Build").with_queue(i32::MAX / 60 + 1, 1);

        let err = dao
            .save_setting(&storage.pool, &setting, 1, false)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidData { .. }));
        assert!(dao.get_setting(&storage.pool, "P1", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_save_keeps_largest_wait_time() {
        let storage = test_storage().await;
        let dao = storage.dao();
        let setting = PipelineSetting::new("proj", "P1", "Build").with_queue(i32::MAX / 60, 1);

        dao.save_setting(&storage.pool, &setting, 1, false)
            .await
            .unwrap();
        let record = dao.get_setting(&storage.pool, "P1", 1).await.unwrap().unwrap();
        assert_eq!(record.to_setting().unwrap().wait_queue_time_minute, i32::MAX / 60);
    }

    #[tokio::test]
    #[serial]
    async fn test_id_list_past_variable_limit_is_query_failure() {
        let storage = test_storage().await;
        let dao = storage.dao();
        let ids: Vec<String> = (0..40_000).map(|i| format!("p-{i}")).collect();

        let err = dao
            .get_settings_in(&storage.pool, &ids)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::QueryFailed { .. }), "unexpected error: {err}");

        let err = dao
            .update_setting_name(&storage.pool, &ids, "Renamed")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::QueryFailed { .. }));
    }
}
