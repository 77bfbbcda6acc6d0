//! Command rendering and configuration tests for the MySQL variant.

use std::path::Path;

use dbrestorer::{DbRestorer, MySql, RestoreError};

#[test]
fn it_provides_a_factory_method() {
    let restorer = MySql::create();
    assert_eq!(restorer.host(), "localhost");
    assert_eq!(restorer.config().port(), 3306);
}

#[tokio::test]
async fn it_will_fail_when_no_credentials_are_set() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("test.sql");

    let error = MySql::create()
        .restore_from_file(&dump.display().to_string())
        .await
        .unwrap_err();

    assert!(matches!(error, RestoreError::IncompleteCredentials { .. }));
    // Validation failed before launch, so no external side effects
    assert!(!dump.exists());
}

#[test]
fn it_can_generate_a_restore_command() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_a_restore_command_without_using_comments() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .dont_skip_comments()
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --extended-insert --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_a_restore_command_without_using_extended_inserts() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .dont_use_extended_inserts()
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --skip-extended-insert --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_a_restore_command_with_custom_binary_path() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .with_restore_binary_path("/custom/directory")
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'/custom/directory/mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_a_restore_command_using_single_transaction() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .use_single_transaction()
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --single-transaction --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_a_restore_command_with_a_custom_socket() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .with_socket("1234")
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --socket=1234 --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_a_restore_command_for_specific_tables_as_array() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .only_tables(["tb1", "tb2", "tb3"])
        .unwrap()
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --result-file=\"dump.sql\" dbname tb1 tb2 tb3"
    );
}

#[test]
fn it_can_generate_a_restore_command_for_specific_tables_as_string() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .only_tables("tb1 tb2 tb3")
        .unwrap()
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --result-file=\"dump.sql\" dbname tb1 tb2 tb3"
    );
}

#[test]
fn it_will_fail_when_setting_exclude_tables_after_only_tables() {
    let error = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .only_tables("tb1 tb2 tb3")
        .unwrap()
        .exclude_tables("tb4 tb5 tb6")
        .unwrap_err();

    assert!(matches!(error, RestoreError::ConflictingParameters { .. }));
}

#[test]
fn it_will_fail_when_setting_only_tables_after_exclude_tables() {
    let error = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .exclude_tables("tb1 tb2 tb3")
        .unwrap()
        .only_tables("tb4 tb5 tb6")
        .unwrap_err();

    assert!(matches!(error, RestoreError::ConflictingParameters { .. }));
}

#[test]
fn it_can_generate_a_restore_command_excluding_tables_as_array() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .exclude_tables(["tb1", "tb2", "tb3"])
        .unwrap()
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --ignore-table=dbname.tb1 --ignore-table=dbname.tb2 --ignore-table=dbname.tb3 --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_a_restore_command_excluding_tables_as_string() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .exclude_tables("tb1, tb2, tb3")
        .unwrap()
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --ignore-table=dbname.tb1 --ignore-table=dbname.tb2 --ignore-table=dbname.tb3 --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_generate_the_contents_of_a_credentials_file() {
    let contents = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .with_host("hostname")
        .credentials_file_contents();

    assert_eq!(
        contents,
        "[client]\nuser = 'username'\npassword = 'password'\nhost = 'hostname'\nport = '3306'"
    );
}

#[test]
fn it_can_get_the_name_of_the_db() {
    let restorer = MySql::create().with_db_name("testName");
    assert_eq!(restorer.db_name(), "testName");
}

#[test]
fn it_can_add_extra_options() {
    let command = MySql::create()
        .with_db_name("dbname")
        .with_user_name("username")
        .with_password("password")
        .add_extra_option("--extra-option")
        .add_extra_option("--another-extra-option=\"value\"")
        .render_command("dump.sql", Some(Path::new("credentials.txt")));

    assert_eq!(
        command,
        "'mysqldump' --defaults-extra-file=\"credentials.txt\" --skip-comments --extended-insert --extra-option --another-extra-option=\"value\" --result-file=\"dump.sql\" dbname"
    );
}

#[test]
fn it_can_get_the_host() {
    let restorer = MySql::create().with_host("myHost");
    assert_eq!(restorer.host(), "myHost");
}
