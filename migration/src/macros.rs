#[macro_export]
macro_rules! drop_table {
    ($table:ident, $manager:ident) => {
        $manager
            .drop_table(Table::drop().table($table::Table).to_owned())
            .await?
    };
}

pub(crate) use drop_table;
