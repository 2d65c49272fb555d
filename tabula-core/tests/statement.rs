#[cfg(test)]
mod tests {
    use indoc::indoc;
    use std::sync::Arc;
    use tabula_core::{
        Column, FieldDescriptor, OrmError, SnakeMapper, SqlType, SqlWriter, Statement, Table,
        Value, ValueKind, map_fields,
        writer::{
            MSSqlWriter, MySQLSqlWriter, OracleSqlWriter, PostgresSqlWriter, SQLiteSqlWriter,
        },
    };

    const NO_ARGS: [Value; 0] = [];

    fn student() -> Arc<Table> {
        let mut table = Table::new("student");
        let mut name = Column::new("name", SqlType::VARCHAR);
        name.is_primary_key = true;
        table.add_column(name).unwrap();
        table.add_column(Column::new("age", SqlType::INT)).unwrap();
        Arc::new(table)
    }

    fn user() -> Arc<Table> {
        let table = map_fields(
            &SnakeMapper,
            "User",
            &[
                FieldDescriptor::new("Id", ValueKind::BigInt, None),
                FieldDescriptor::new(
                    "Name",
                    ValueKind::Text,
                    Some("varchar(64) not null unique"),
                ),
                FieldDescriptor::new("Age", ValueKind::Int, Some("default 18 index(profile)")),
                FieldDescriptor::new("City", ValueKind::Text, Some("index(profile)")),
            ],
        )
        .expect("Could not map User");
        Arc::new(table)
    }

    fn paginated(writer: &dyn SqlWriter, offset: u64, limit: u64) -> Statement {
        let mut statement = Statement::for_table(student());
        let mut counter = 1;
        statement
            .filter(writer, &mut counter, "a == b", NO_ARGS)
            .unwrap()
            .cols(["col-a"])
            .limit(limit)
            .offset(offset);
        statement
    }

    fn pagination_error(writer: &dyn SqlWriter, statement: &Statement) -> OrmError {
        writer
            .write_select(&mut String::new(), statement)
            .expect_err("The select should have been rejected")
            .downcast_ref::<OrmError>()
            .cloned()
            .expect("Expected a typed error")
    }

    #[test]
    fn row_number_pagination() {
        let statement = paginated(&MSSqlWriter, 10, 100);
        assert_eq!(
            statement.select_sql(&MSSqlWriter).unwrap(),
            "select col-a from (select ROW_NUMBER() OVER(order by name )as rownum,col-a from student WHERE a == b) as a where rownum between 10 and 100"
        );
        assert_eq!(
            statement.select_sql(&OracleSqlWriter).unwrap(),
            "select col-a from (select ROW_NUMBER() OVER(order by name )as rn,col-a from student WHERE a == b) a where rn between 10 and 100"
        );
        let statement = paginated(&OracleSqlWriter, 0, 20);
        assert_eq!(
            statement.select_sql(&OracleSqlWriter).unwrap(),
            "select col-a from (select ROW_NUMBER() OVER(order by name )as rn,col-a from student WHERE a == b) a where rn between 0 and 20"
        );
    }

    #[test]
    fn row_number_order_and_join() {
        let mut statement = paginated(&MSSqlWriter, 5, 15);
        statement
            .order_by("age desc")
            .join("LEFT", "school", "school.id = student.school_id");
        assert_eq!(
            statement.select_sql(&MSSqlWriter).unwrap(),
            "select col-a from (select ROW_NUMBER() OVER(order by age desc )as rownum,col-a from student LEFT JOIN school ON school.id = student.school_id WHERE a == b) as a where rownum between 5 and 15"
        );
    }

    #[test]
    fn limit_offset_pagination() {
        let statement = paginated(&MySQLSqlWriter, 10, 100);
        assert_eq!(
            statement.select_sql(&MySQLSqlWriter).unwrap(),
            "SELECT col-a FROM student WHERE a == b LIMIT 10, 100"
        );
        assert_eq!(
            statement.select_sql(&SQLiteSqlWriter).unwrap(),
            "SELECT col-a FROM student WHERE a == b LIMIT 10, 100"
        );
        assert_eq!(
            statement.select_sql(&PostgresSqlWriter).unwrap(),
            "SELECT col-a FROM student WHERE a == b LIMIT 100 OFFSET 10"
        );
        let statement = paginated(&MySQLSqlWriter, 0, 100);
        assert_eq!(
            statement.select_sql(&MySQLSqlWriter).unwrap(),
            "SELECT col-a FROM student WHERE a == b LIMIT 100"
        );
        assert_eq!(
            statement.select_sql(&PostgresSqlWriter).unwrap(),
            "SELECT col-a FROM student WHERE a == b LIMIT 100"
        );
    }

    #[test]
    fn top_pagination() {
        let statement = paginated(&MSSqlWriter, 0, 5);
        assert_eq!(
            statement.select_sql(&MSSqlWriter).unwrap(),
            "SELECT TOP 5 col-a FROM student WHERE a == b"
        );
    }

    #[test]
    fn unpaginated_clauses() {
        let mut statement = Statement::new();
        statement
            .table_name("orders")
            .join("INNER", "customer", "customer.id = orders.customer_id")
            .group_by("customer.id")
            .having("COUNT(*) > 1")
            .order_by("customer.id");
        let mut counter = 1;
        statement
            .filter(&MySQLSqlWriter, &mut counter, "total > ?", [Value::from(10)])
            .unwrap();
        let expected = "SELECT * FROM orders INNER JOIN customer ON customer.id = orders.customer_id WHERE total > ? GROUP BY customer.id HAVING COUNT(*) > 1 ORDER BY customer.id";
        for writer in [
            &MySQLSqlWriter as &dyn SqlWriter,
            &PostgresSqlWriter,
            &SQLiteSqlWriter,
            &MSSqlWriter,
            &OracleSqlWriter,
        ] {
            assert_eq!(statement.select_sql(writer).unwrap(), expected);
        }
        assert_eq!(statement.params, [Value::Int(10)]);
        assert_eq!(counter, 2);
    }

    #[test]
    fn mapped_columns() {
        let statement = Statement::for_table(user());
        assert_eq!(
            statement.select_sql(&MySQLSqlWriter).unwrap(),
            "SELECT id, name, age, city FROM user"
        );
        assert_eq!(
            statement.count_sql(&MySQLSqlWriter).unwrap(),
            "SELECT COUNT(*) FROM user"
        );
    }

    #[test]
    fn pagination_rejections() {
        let mut statement = Statement::for_table(student());
        statement.offset(10);
        for writer in [
            &MySQLSqlWriter as &dyn SqlWriter,
            &PostgresSqlWriter,
            &SQLiteSqlWriter,
            &MSSqlWriter,
            &OracleSqlWriter,
        ] {
            assert!(matches!(
                pagination_error(writer, &statement),
                OrmError::UnsupportedPagination(..)
            ));
        }

        let mut statement = paginated(&MSSqlWriter, 10, 100);
        statement.group_by("age");
        assert!(matches!(
            pagination_error(&MSSqlWriter, &statement),
            OrmError::UnsupportedPagination(..)
        ));
        statement.group_by("").having("age > 3");
        assert!(matches!(
            pagination_error(&OracleSqlWriter, &statement),
            OrmError::UnsupportedPagination(..)
        ));

        let mut statement = Statement::new();
        statement.table_name("log").limit(10);
        assert!(matches!(
            pagination_error(&OracleSqlWriter, &statement),
            OrmError::UnsupportedPagination(..)
        ));
        statement.order_by("created_at");
        assert_eq!(
            statement.select_sql(&OracleSqlWriter).unwrap(),
            "select * from (select ROW_NUMBER() OVER(order by created_at )as rn,log.* from log) a where rn between 0 and 10"
        );

        assert!(Statement::new().select_sql(&MySQLSqlWriter).is_err());
    }

    #[test]
    fn primary_key_filter() {
        let cases: [(&dyn SqlWriter, &str); 5] = [
            (&PostgresSqlWriter, "\"id\" = $1"),
            (&OracleSqlWriter, "\"id\" = :1"),
            (&MySQLSqlWriter, "`id` = ?"),
            (&SQLiteSqlWriter, "\"id\" = ?"),
            (&MSSqlWriter, "[id] = ?"),
        ];
        for (writer, expected) in cases {
            let mut statement = Statement::for_table(user());
            let mut counter = 1;
            statement.filter(writer, &mut counter, 7, NO_ARGS).unwrap();
            assert_eq!(statement.where_str, expected);
            assert_eq!(statement.params, [Value::Int(7)]);
            assert_eq!(counter, 2);
        }

        let mut statement = Statement::for_table(user());
        let mut counter = 1;
        statement
            .filter(&PostgresSqlWriter, &mut counter, "age > $1", [Value::from(30)])
            .unwrap();
        statement
            .filter(&PostgresSqlWriter, &mut counter, Value::from("x"), NO_ARGS)
            .unwrap();
        assert_eq!(statement.where_str, "\"id\" = $1");
        assert_eq!(statement.params, [Value::from("x")]);
    }

    #[test]
    fn primary_key_filter_rejections() {
        let mut statement = Statement::new();
        statement.table_name("log");
        let mut counter = 1;
        assert!(
            statement
                .filter(&MySQLSqlWriter, &mut counter, 1, NO_ARGS)
                .is_err()
        );

        let mut table = Table::new("log");
        table.add_column(Column::new("message", SqlType::TEXT)).unwrap();
        let mut statement = Statement::for_table(Arc::new(table));
        let error = statement
            .filter(&MySQLSqlWriter, &mut counter, 1, NO_ARGS)
            .expect_err("A table without primary key cannot be filtered by it");
        assert_eq!(
            error.downcast_ref::<OrmError>(),
            Some(&OrmError::MissingPrimaryKey("log".into()))
        );
    }

    #[test]
    fn insert() {
        let statement = Statement::for_table(user());
        let values = vec![Value::from("Alice"), Value::from(31), Value::from("Turin")];
        let (sql, params) = statement
            .insert_sql(&PostgresSqlWriter, values.clone())
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"user\" (\"name\", \"age\", \"city\") VALUES ($1, $2, $3);"
        );
        assert_eq!(params, values);
        let (sql, _) = statement.insert_sql(&MySQLSqlWriter, values).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `user` (`name`, `age`, `city`) VALUES (?, ?, ?);"
        );
        assert!(
            statement
                .insert_sql(&MySQLSqlWriter, vec![Value::from("Bob")])
                .is_err()
        );
    }

    #[test]
    fn update_parameter_order() {
        let values = vec![Value::from("Alice"), Value::from(32), Value::Null];

        let mut statement = Statement::for_table(user());
        let mut counter = 1;
        statement
            .filter(&PostgresSqlWriter, &mut counter, 7, NO_ARGS)
            .unwrap();
        let (sql, params) = statement
            .update_sql(&PostgresSqlWriter, values.clone())
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE \"user\" SET \"name\" = $2, \"age\" = $3, \"city\" = $4 WHERE \"id\" = $1;"
        );
        assert_eq!(
            params,
            [Value::Int(7), Value::from("Alice"), Value::from(32), Value::Null]
        );

        let mut statement = Statement::for_table(user());
        let mut counter = 1;
        statement
            .filter(&MySQLSqlWriter, &mut counter, 7, NO_ARGS)
            .unwrap();
        let (sql, params) = statement.update_sql(&MySQLSqlWriter, values).unwrap();
        assert_eq!(
            sql,
            "UPDATE `user` SET `name` = ?, `age` = ?, `city` = ? WHERE `id` = ?;"
        );
        assert_eq!(
            params,
            [Value::from("Alice"), Value::from(32), Value::Null, Value::Int(7)]
        );
    }

    #[test]
    fn delete() {
        let mut statement = Statement::for_table(user());
        let mut counter = 1;
        statement
            .filter(&MSSqlWriter, &mut counter, 3, NO_ARGS)
            .unwrap();
        let (sql, params) = statement.delete_sql(&MSSqlWriter).unwrap();
        assert_eq!(sql, "DELETE FROM [user] WHERE [id] = ?;");
        assert_eq!(params, [Value::Int(3)]);
    }

    #[test]
    fn create_table_mysql() {
        let mut statement = Statement::for_table(user());
        statement.store_engine("InnoDB").charset("utf8mb4");
        let sql = statement.create_table_sql(&MySQLSqlWriter, true).unwrap();
        assert_eq!(
            sql,
            [
                indoc! {"
                    CREATE TABLE IF NOT EXISTS `user` (
                    `id` BIGINT PRIMARY KEY AUTO_INCREMENT NOT NULL,
                    `name` VARCHAR(64) NOT NULL,
                    `age` INT NULL DEFAULT 18,
                    `city` VARCHAR(255) NULL) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;
                "}
                .trim(),
                "CREATE INDEX `IDX_user_profile` ON `user` (`age`, `city`);",
                "CREATE UNIQUE INDEX `UQE_user_name` ON `user` (`name`);",
            ]
        );
    }

    #[test]
    fn create_table_postgres() {
        let mut statement = Statement::for_table(user());
        statement.store_engine("InnoDB");
        let sql = statement.create_table_sql(&PostgresSqlWriter, false).unwrap();
        assert_eq!(
            sql[0],
            indoc! {r#"
                CREATE TABLE "user" (
                "id" BIGSERIAL PRIMARY KEY NOT NULL,
                "name" VARCHAR(64) NOT NULL,
                "age" INTEGER NULL DEFAULT 18,
                "city" VARCHAR(255) NULL);
            "#}
            .trim()
        );
        assert_eq!(
            sql[2],
            "CREATE UNIQUE INDEX \"UQE_user_name\" ON \"user\" (\"name\");"
        );
    }

    #[test]
    fn create_table_sqlite() {
        let statement = Statement::for_table(user());
        let sql = statement.create_table_sql(&SQLiteSqlWriter, true).unwrap();
        assert_eq!(
            sql[0],
            indoc! {r#"
                CREATE TABLE IF NOT EXISTS "user" (
                "id" INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                "name" TEXT NOT NULL,
                "age" INTEGER NULL DEFAULT 18,
                "city" TEXT NULL);
            "#}
            .trim()
        );
    }

    #[test]
    fn create_table_mssql() {
        let statement = Statement::for_table(user());
        let sql = statement.create_table_sql(&MSSqlWriter, true).unwrap();
        assert_eq!(
            sql[0],
            indoc! {"
                IF OBJECT_ID('user', 'U') IS NULL
                CREATE TABLE [user] (
                [id] BIGINT IDENTITY(1,1) PRIMARY KEY NOT NULL,
                [name] VARCHAR(64) NOT NULL,
                [age] INT NULL DEFAULT 18,
                [city] VARCHAR(255) NULL);
            "}
            .trim()
        );
        assert_eq!(
            sql[1],
            "CREATE INDEX [IDX_user_profile] ON [user] ([age], [city]);"
        );
    }

    #[test]
    fn create_table_oracle() {
        let statement = Statement::for_table(user());
        let sql = statement.create_table_sql(&OracleSqlWriter, true).unwrap();
        assert_eq!(
            sql[0],
            indoc! {r#"
                BEGIN EXECUTE IMMEDIATE 'CREATE TABLE "user" (
                "id" NUMBER(19) GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY NOT NULL,
                "name" VARCHAR2(64) NOT NULL,
                "age" NUMBER(10) DEFAULT 18 NULL,
                "city" VARCHAR2(255) NULL)'; EXCEPTION WHEN OTHERS THEN IF SQLCODE != -955 THEN RAISE; END IF; END;
            "#}
            .trim()
        );
        let sql = statement.create_table_sql(&OracleSqlWriter, false).unwrap();
        assert!(sql[0].starts_with("CREATE TABLE \"user\" (\n\"id\" NUMBER(19)"));
        assert!(sql[0].ends_with("\"city\" VARCHAR2(255) NULL);"));
    }

    #[test]
    fn drop_table() {
        let statement = Statement::for_table(user());
        assert_eq!(
            statement.drop_table_sql(&MySQLSqlWriter, true).unwrap(),
            "DROP TABLE IF EXISTS `user`;"
        );
        assert_eq!(
            statement.drop_table_sql(&MSSqlWriter, false).unwrap(),
            "DROP TABLE [user];"
        );
        assert_eq!(
            statement.drop_table_sql(&OracleSqlWriter, true).unwrap(),
            "BEGIN EXECUTE IMMEDIATE 'DROP TABLE \"user\"'; EXCEPTION WHEN OTHERS THEN IF SQLCODE != -942 THEN RAISE; END IF; END;"
        );
        assert_eq!(
            statement.drop_table_sql(&OracleSqlWriter, false).unwrap(),
            "DROP TABLE \"user\";"
        );
    }

    #[test]
    fn serial_columns_in_ddl() {
        let mut table = Table::new("counter");
        table.add_column(Column::new("seq", SqlType::SERIAL)).unwrap();
        let statement = Statement::for_table(Arc::new(table));
        let sql = statement.create_table_sql(&MySQLSqlWriter, false).unwrap();
        assert_eq!(
            sql,
            ["CREATE TABLE `counter` (\n`seq` INT PRIMARY KEY AUTO_INCREMENT NOT NULL);"]
        );
    }
}
