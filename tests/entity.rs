#[cfg(test)]
mod tests {
    use indoc::indoc;
    use std::borrow::Cow;
    use tabula::{Dialect, Engine, Grouping, Mapped, MapType, SnakeMapper, SqlType, map_type};
    use time::PrimitiveDateTime;

    #[derive(Mapped)]
    #[allow(dead_code)]
    struct Address {
        street: String,
        #[orm("varchar(8) index(location)")]
        zip: String,
        #[orm("index(location)")]
        city: Option<String>,
    }

    #[derive(Mapped)]
    #[allow(dead_code)]
    struct Customer {
        id: i64,
        #[orm("varchar(64) not null unique")]
        email: String,
        #[orm("extends")]
        address: Address,
        active: bool,
        score: f64,
        avatar: Option<Vec<u8>>,
        created_at: PrimitiveDateTime,
        #[orm("-")]
        session_token: String,
    }

    #[test]
    fn derived_fields() {
        let table = map_type::<Customer>(&SnakeMapper).expect("Could not map Customer");
        assert_eq!(Customer::type_name(), "Customer");
        assert_eq!(table.name, "customer");
        assert_eq!(
            table.column_str(),
            "id, email, street, zip, city, active, score, avatar, created_at"
        );
        assert_eq!(table.primary_key.as_deref(), Some("id"));
        assert_eq!(table.columns["zip"].field_name, "address.zip");
        assert_eq!(table.columns["zip"].length, 8);
        assert_eq!(table.columns["active"].sql_type, SqlType::BOOL);
        assert_eq!(table.columns["score"].sql_type, SqlType::DOUBLE);
        assert_eq!(table.columns["avatar"].sql_type, SqlType::BLOB);
        assert_eq!(table.columns["created_at"].sql_type, SqlType::DATETIME);
        assert_eq!(table.indexes["location"], ["zip", "city"]);
        assert_eq!(table.columns["email"].unique, Grouping::Single);
        assert!(table.column("session_token").is_none());
    }

    #[test]
    fn raw_identifiers() {
        #[derive(Mapped)]
        #[allow(dead_code)]
        struct Event<'a> {
            #[orm("pk varchar(36)")]
            uuid: Cow<'a, str>,
            r#type: i16,
            #[orm("<- text")]
            payload: Box<str>,
            #[orm("-> text")]
            note: Option<Cow<'a, str>>,
        }
        let table = map_type::<Event>(&SnakeMapper).unwrap();
        assert_eq!(table.name, "event");
        assert_eq!(table.column_str(), "uuid, type, payload, note");
        assert_eq!(table.primary_key.as_deref(), Some("uuid"));
        assert_eq!(table.columns["type"].sql_type, SqlType::INT);
        assert_eq!(table.columns["payload"].map_type, MapType::ReadOnly);
        assert_eq!(table.columns["note"].map_type, MapType::WriteOnly);
    }

    #[test]
    fn mysql_ddl() {
        let mut engine = Engine::with_dialect(Dialect::MySQL, "mysql://localhost/shop");
        engine.show_sql(false);
        let sql = engine
            .create_table_sql::<Customer>(false)
            .expect("Could not compile the table");
        assert_eq!(
            sql,
            [
                indoc! {"
                    CREATE TABLE `customer` (
                    `id` BIGINT PRIMARY KEY AUTO_INCREMENT NOT NULL,
                    `email` VARCHAR(64) NOT NULL,
                    `street` VARCHAR(255) NULL,
                    `zip` VARCHAR(8) NULL,
                    `city` VARCHAR(255) NULL,
                    `active` TINYINT NULL,
                    `score` DOUBLE NULL,
                    `avatar` BLOB NULL,
                    `created_at` DATETIME NULL);
                "}
                .trim(),
                "CREATE INDEX `IDX_customer_location` ON `customer` (`zip`, `city`);",
                "CREATE UNIQUE INDEX `UQE_customer_email` ON `customer` (`email`);",
            ]
        );
        assert_eq!(
            engine.drop_table_sql::<Customer>(true).unwrap(),
            "DROP TABLE IF EXISTS `customer`;"
        );
    }

    #[test]
    fn postgres_select() {
        let engine = Engine::with_dialect(Dialect::Postgres, "");
        let mut session = engine.new_session();
        session
            .for_type::<Customer>()
            .unwrap()
            .filter(42, Vec::new())
            .unwrap()
            .limit(1);
        assert_eq!(
            session.select_sql().unwrap(),
            "SELECT id, email, street, zip, city, active, score, avatar, created_at FROM customer WHERE \"id\" = $1 LIMIT 1"
        );
    }
}
