pub mod shops_csv;
