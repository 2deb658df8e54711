//! Unit tests for the DCL module

mod privilege_tests {
	use super::super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Privilege::Select, "SELECT", 'r')]
	#[case(Privilege::Insert, "INSERT", 'a')]
	#[case(Privilege::Update, "UPDATE", 'w')]
	#[case(Privilege::Delete, "DELETE", 'd')]
	#[case(Privilege::References, "REFERENCES", 'x')]
	#[case(Privilege::Usage, "USAGE", 'U')]
	#[case(Privilege::Create, "CREATE", 'C')]
	fn test_privilege_sql_and_letter(
		#[case] privilege: Privilege,
		#[case] sql: &str,
		#[case] letter: char,
	) {
		// Act & Assert
		assert_eq!(privilege.as_sql(), sql);
		assert_eq!(privilege.acl_letter(), letter);
	}

	#[rstest]
	fn test_table_privileges_are_invalid_on_schema() {
		for privilege in [
			Privilege::Select,
			Privilege::Insert,
			Privilege::Update,
			Privilege::Delete,
			Privilege::References,
		] {
			assert!(privilege.is_valid_for_object(ObjectType::AllTablesInSchema));
			assert!(privilege.is_valid_for_object(ObjectType::Tables));
			assert!(!privilege.is_valid_for_object(ObjectType::Schema));
		}
	}

	#[rstest]
	fn test_schema_privileges_are_invalid_on_tables() {
		for privilege in [Privilege::Usage, Privilege::Create] {
			assert!(privilege.is_valid_for_object(ObjectType::Schema));
			assert!(!privilege.is_valid_for_object(ObjectType::AllTablesInSchema));
			assert!(!privilege.is_valid_for_object(ObjectType::Tables));
		}
	}
}

mod validation_tests {
	use super::super::*;
	use rstest::rstest;

	#[rstest]
	fn test_grant_without_privileges_is_invalid() {
		// Arrange
		let stmt = GrantStatement::new()
			.on_schema("analytics")
			.to(Grantee::group("analysts"));

		// Act
		let result = stmt.validate();

		// Assert
		assert_eq!(
			result.unwrap_err(),
			"At least one privilege must be specified"
		);
	}

	#[rstest]
	fn test_grant_with_mismatched_object_is_invalid() {
		// Arrange
		let stmt = GrantStatement::new()
			.privilege(Privilege::Select)
			.on_schema("analytics")
			.to(Grantee::group("analysts"));

		// Act
		let result = stmt.validate();

		// Assert
		assert!(result.unwrap_err().contains("not valid for object type"));
	}

	#[rstest]
	#[case::empty_schema(
		GrantStatement::new()
			.privilege(Privilege::Usage)
			.on_schema("")
			.to(Grantee::group("analysts"))
			.into(),
		"Object names must not be empty"
	)]
	#[case::empty_group(
		RevokeStatement::new()
			.privilege(Privilege::Usage)
			.on_schema("analytics")
			.from(Grantee::group(""))
			.into(),
		"Grantee names must not be empty"
	)]
	#[case::empty_owner(
		AlterDefaultPrivilegesStatement::revoke()
			.for_user("")
			.in_schema("analytics")
			.privilege(Privilege::Select)
			.grantee(Grantee::group("analysts"))
			.into(),
		"Target user names must not be empty"
	)]
	fn test_empty_names_are_invalid(#[case] stmt: DclStatement, #[case] expected: &str) {
		// Act
		let result = stmt.validate();

		// Assert
		assert_eq!(result.unwrap_err(), expected);
	}

	#[rstest]
	fn test_wrapped_statement_is_validated() {
		// Arrange
		let stmt: DclStatement = RevokeStatement::new()
			.privilege(Privilege::Delete)
			.on_schema("analytics")
			.from(Grantee::group("analysts"))
			.into();

		// Act
		let result = stmt.validate();

		// Assert
		assert!(result.unwrap_err().contains("not valid for object type"));
	}

	#[rstest]
	fn test_revoke_without_grantee_is_invalid() {
		// Arrange
		let stmt = RevokeStatement::new()
			.privilege(Privilege::Usage)
			.on_schema("analytics");

		// Act
		let result = stmt.validate();

		// Assert
		assert_eq!(result.unwrap_err(), "At least one grantee must be specified");
	}

	#[rstest]
	fn test_default_privileges_reject_schema_privileges() {
		// Arrange
		let stmt = AlterDefaultPrivilegesStatement::grant()
			.in_schema("analytics")
			.privilege(Privilege::Usage)
			.grantee(Grantee::group("analysts"));

		// Act
		let result = stmt.validate();

		// Assert
		assert!(result.is_err());
	}
}

mod rendering_tests {
	use super::super::*;
	use crate::backend::RedshiftQueryBuilder;
	use rstest::rstest;

	#[rstest]
	#[case(
		GrantStatement::new()
			.privilege(Privilege::Select)
			.on_all_tables_in_schema("analytics")
			.to(Grantee::group("analysts"))
			.into(),
		"GRANT SELECT ON ALL TABLES IN SCHEMA analytics TO GROUP analysts"
	)]
	#[case(
		GrantStatement::new()
			.privileges(vec![Privilege::Usage, Privilege::Create])
			.on_schema("analytics")
			.to(Grantee::group("analysts"))
			.into(),
		"GRANT USAGE, CREATE ON SCHEMA analytics TO GROUP analysts"
	)]
	#[case(
		RevokeStatement::new()
			.privilege(Privilege::References)
			.on_all_tables_in_schema("analytics")
			.from(Grantee::group("analysts"))
			.into(),
		"REVOKE REFERENCES ON ALL TABLES IN SCHEMA analytics FROM GROUP analysts"
	)]
	#[case(
		AlterDefaultPrivilegesStatement::grant()
			.for_user("etl")
			.in_schema("analytics")
			.privilege(Privilege::Insert)
			.grantee(Grantee::group("analysts"))
			.into(),
		"ALTER DEFAULT PRIVILEGES FOR USER etl IN SCHEMA analytics GRANT INSERT ON TABLES TO GROUP analysts"
	)]
	#[case(
		AlterDefaultPrivilegesStatement::revoke()
			.in_schema("analytics")
			.privilege(Privilege::Delete)
			.grantee(Grantee::group("analysts"))
			.into(),
		"ALTER DEFAULT PRIVILEGES IN SCHEMA analytics REVOKE DELETE ON TABLES FROM GROUP analysts"
	)]
	fn test_render_statement(#[case] stmt: DclStatement, #[case] expected: &str) {
		// Act
		let sql = stmt.to_string(RedshiftQueryBuilder::new());

		// Assert
		assert_eq!(sql, expected);
	}

	#[rstest]
	fn test_render_quotes_unsafe_identifiers() {
		// Arrange
		let stmt = GrantStatement::new()
			.privilege(Privilege::Usage)
			.on_schema("Finance")
			.to(Grantee::group("data team"));

		// Act
		let sql = stmt.to_string(RedshiftQueryBuilder::new());

		// Assert
		assert_eq!(
			sql,
			"GRANT USAGE ON SCHEMA \"Finance\" TO GROUP \"data team\""
		);
	}

	#[rstest]
	fn test_render_escapes_embedded_quotes() {
		// Arrange
		let stmt = RevokeStatement::new()
			.privilege(Privilege::Usage)
			.on_schema("x\"; DROP TABLE t; --")
			.from(Grantee::group("analysts"));

		// Act
		let sql = stmt.to_string(RedshiftQueryBuilder::new());

		// Assert
		assert_eq!(
			sql,
			"REVOKE USAGE ON SCHEMA \"x\"\"; DROP TABLE t; --\" FROM GROUP analysts"
		);
	}
}
