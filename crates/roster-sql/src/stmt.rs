use roster_core::schema::db;

#[derive(Debug)]
pub enum Statement {
    CreateTable(CreateTable),
    CreateIndex(CreateIndex),
    CreateTrigger(CreateTrigger),
    DropTable(DropTable),
}

#[derive(Debug)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyDef>,
}

#[derive(Debug)]
pub struct ColumnDef {
    pub name: String,
    pub ty: db::Type,
    pub nullable: bool,
}

#[derive(Debug)]
pub struct ForeignKeyDef {
    pub column: String,
    pub target_table: String,
    pub target_column: String,
    pub on_delete: db::OnDelete,
}

#[derive(Debug)]
pub struct CreateIndex {
    pub name: String,
    pub on: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

/// `AFTER DELETE` cleanup trigger; see `db::Trigger`.
#[derive(Debug)]
pub struct CreateTrigger {
    pub name: String,
    pub on: String,
    pub key_column: String,
    pub target_table: String,
    pub target_column: String,
}

#[derive(Debug)]
pub struct DropTable {
    pub name: String,
    pub if_exists: bool,
}

impl Statement {
    /// DDL creating the full schema. All tables are created first so
    /// foreign key references and trigger bodies never name a table that
    /// does not exist yet.
    pub fn schema_ddl(schema: &db::Schema) -> Vec<Statement> {
        let mut statements = vec![];

        for table in &schema.tables {
            statements.push(Statement::CreateTable(CreateTable::from_schema(
                schema, table,
            )));
        }
        for table in &schema.tables {
            for index in &table.indices {
                statements.push(Statement::CreateIndex(CreateIndex {
                    name: index.name.clone(),
                    on: table.name.clone(),
                    columns: index
                        .columns
                        .iter()
                        .map(|&column| schema.column(column).name.clone())
                        .collect(),
                    unique: index.unique,
                }));
            }
        }
        for table in &schema.tables {
            for trigger in &table.triggers {
                statements.push(Statement::CreateTrigger(CreateTrigger {
                    name: trigger.name.clone(),
                    on: table.name.clone(),
                    key_column: schema.column(trigger.key_column).name.clone(),
                    target_table: schema.table(trigger.target_table).name.clone(),
                    target_column: schema.column(trigger.target_column).name.clone(),
                }));
            }
        }

        statements
    }

    /// DDL dropping every table in the schema, for resetting a database
    /// before recreating it. Triggers and indexes are dropped implicitly
    /// with their tables.
    pub fn drop_ddl(schema: &db::Schema) -> Vec<Statement> {
        schema
            .tables
            .iter()
            .rev()
            .map(|table| {
                Statement::DropTable(DropTable {
                    name: table.name.clone(),
                    if_exists: true,
                })
            })
            .collect()
    }
}

impl CreateTable {
    fn from_schema(schema: &db::Schema, table: &db::Table) -> Self {
        Self {
            name: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|column| ColumnDef {
                    name: column.name.clone(),
                    ty: column.storage_ty,
                    nullable: column.nullable,
                })
                .collect(),
            primary_key: table
                .primary_key_columns()
                .map(|column| column.name.clone())
                .collect(),
            foreign_keys: table
                .foreign_keys
                .iter()
                .map(|fk| ForeignKeyDef {
                    column: schema.column(fk.column).name.clone(),
                    target_table: schema.table(fk.target_table).name.clone(),
                    target_column: schema.column(fk.target_column).name.clone(),
                    on_delete: fk.on_delete,
                })
                .collect(),
        }
    }
}
