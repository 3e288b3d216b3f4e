//! End-to-end pipeline tests: CSV text in, evaluated models out.

use std::io::Write;

use tabtrees::{
    train_test_split, DataTable, Dataset, DecisionTreeModel, DecisionTreeParams, FeatureAssembler,
    FeatureType, IndexerError, MetricFn, MulticlassAccuracy, RandomForestModel,
    RandomForestParams, StringIndexer,
};

/// 12 raw rows; the two rows with missing fields clean away, leaving 10 rows
/// with 2 categorical columns, 1 numeric column, and a binary label.
const TWELVE_ROWS: &str = "\
workclass,education,age,income_class
Private,Bachelors,39,<=50K
Private,HS-grad,50,<=50K
Gov,Bachelors,38,>50K
Private,Masters,53,>50K
Gov,HS-grad,28,<=50K
Private,Bachelors,37,>50K
?,Masters,49,>50K
Private,HS-grad,52,<=50K
Gov,Masters,31,>50K
Private,Bachelors,,<=50K
Private,HS-grad,42,<=50K
Gov,Bachelors,30,>50K
";

/// Education predicts the label exactly.
const SEPARABLE: &str = "\
workclass,education,age,income_class
Private,Masters,39,>50K
Gov,HS-grad,50,<=50K
Private,Masters,38,>50K
Private,HS-grad,53,<=50K
Gov,Masters,28,>50K
Private,HS-grad,37,<=50K
Gov,Masters,49,>50K
Private,HS-grad,52,<=50K
Private,Masters,31,>50K
Gov,HS-grad,42,<=50K
Private,Masters,30,>50K
Gov,HS-grad,23,<=50K
Private,Masters,32,>50K
Private,HS-grad,40,<=50K
Gov,Masters,34,>50K
Private,HS-grad,25,<=50K
Gov,Masters,43,>50K
Private,HS-grad,54,<=50K
Private,Masters,35,>50K
Gov,HS-grad,59,<=50K
";

fn build_dataset(csv: &str, label: &str) -> (Dataset, StringIndexer, Vec<StringIndexer>) {
    let table = DataTable::from_reader(csv.as_bytes()).unwrap().drop_missing();
    let partition = table.partition_columns(label).unwrap();
    let indexers: Vec<StringIndexer> = partition
        .categorical
        .iter()
        .map(|name| StringIndexer::fit(table.column(name).unwrap()).unwrap())
        .collect();
    let label_indexer = StringIndexer::fit(table.column(label).unwrap()).unwrap();
    let assembler = FeatureAssembler::new(partition.categorical, partition.numerical);
    let dataset = assembler.assemble(&table, &indexers, &label_indexer).unwrap();
    (dataset, label_indexer, indexers)
}

#[test]
fn ten_row_scenario_runs_end_to_end() {
    let (dataset, label_indexer, _) = build_dataset(TWELVE_ROWS, "income_class");
    assert_eq!(dataset.n_samples(), 10);
    assert_eq!(dataset.n_features(), 3);
    assert_eq!(label_indexer.len(), 2);

    let (train, test) = train_test_split(&dataset, 0.8, 42).unwrap();
    assert_eq!(train.n_samples() + test.n_samples(), 10);

    let dt = DecisionTreeModel::fit(&train, DecisionTreeParams::default()).unwrap();
    let rf_params = RandomForestParams::builder()
        .n_trees(20)
        .n_threads(1)
        .build()
        .unwrap();
    let rf = RandomForestModel::fit(&train, rf_params).unwrap();

    let labels = test.labels().unwrap();
    for accuracy in [
        MulticlassAccuracy.compute(dt.predict(&test).view(), labels),
        MulticlassAccuracy.compute(rf.predict(&test).view(), labels),
    ] {
        assert!((0.0..=1.0).contains(&accuracy));
    }
}

#[test]
fn ten_row_scenario_is_reproducible() {
    let (dataset, _, _) = build_dataset(TWELVE_ROWS, "income_class");
    let (train_a, test_a) = train_test_split(&dataset, 0.8, 42).unwrap();
    let (train_b, test_b) = train_test_split(&dataset, 0.8, 42).unwrap();

    assert_eq!(train_a.n_samples(), train_b.n_samples());
    assert_eq!(test_a.n_samples(), test_b.n_samples());
    for f in 0..dataset.n_features() {
        assert_eq!(train_a.feature(f).to_vec(), train_b.feature(f).to_vec());
        assert_eq!(test_a.feature(f).to_vec(), test_b.feature(f).to_vec());
    }

    let dt_a = DecisionTreeModel::fit(&train_a, DecisionTreeParams::default()).unwrap();
    let dt_b = DecisionTreeModel::fit(&train_b, DecisionTreeParams::default()).unwrap();
    assert_eq!(dt_a.predict(&test_a).to_vec(), dt_b.predict(&test_b).to_vec());
}

#[test]
fn cleaning_is_complete_and_idempotent() {
    let table = DataTable::from_reader(TWELVE_ROWS.as_bytes()).unwrap();
    assert_eq!(table.n_rows(), 12);
    assert!(table.has_missing());

    let cleaned = table.drop_missing();
    assert_eq!(cleaned.n_rows(), 10);
    assert!(!cleaned.has_missing());

    let recleaned = cleaned.drop_missing();
    assert_eq!(recleaned.n_rows(), cleaned.n_rows());
    assert_eq!(recleaned.columns(), cleaned.columns());
}

#[test]
fn feature_order_is_categoricals_then_numericals() {
    let (dataset, _, _) = build_dataset(TWELVE_ROWS, "income_class");
    let names: Vec<&str> = dataset.schema().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["workclass", "education", "age"]);
    assert_eq!(dataset.schema().feature_type(0), FeatureType::Categorical);
    assert_eq!(dataset.schema().feature_type(1), FeatureType::Categorical);
    assert_eq!(dataset.schema().feature_type(2), FeatureType::Numeric);
}

#[test]
fn indexers_are_bijections_over_observed_values() {
    let (_, label_indexer, indexers) = build_dataset(TWELVE_ROWS, "income_class");

    for indexer in indexers.iter().chain([&label_indexer]) {
        for (idx, value) in indexer.labels().iter().enumerate() {
            assert_eq!(indexer.transform_value(value).unwrap(), idx);
            assert_eq!(indexer.label_for(idx), Some(value.as_str()));
        }
        assert!(indexer.label_for(indexer.len()).is_none());
    }
}

#[test]
fn both_models_fit_separable_data_perfectly() {
    let (dataset, _, _) = build_dataset(SEPARABLE, "income_class");

    let dt = DecisionTreeModel::fit(&dataset, DecisionTreeParams::default()).unwrap();
    let labels = dataset.labels().unwrap();
    let dt_accuracy = MulticlassAccuracy.compute(dt.predict(&dataset).view(), labels);
    assert_eq!(dt_accuracy, 1.0);

    let rf_params = RandomForestParams::builder()
        .n_trees(30)
        .n_threads(1)
        .build()
        .unwrap();
    let rf = RandomForestModel::fit(&dataset, rf_params).unwrap();
    let rf_accuracy = MulticlassAccuracy.compute(rf.predict(&dataset).view(), labels);
    assert_eq!(rf_accuracy, 1.0);
}

#[test]
fn table_that_cleans_to_nothing_fails_at_indexing() {
    // Every row has a missing field.
    let csv = "workclass,age,income_class\n?,39,<=50K\nPrivate,,>50K\n";
    let table = DataTable::from_reader(csv.as_bytes()).unwrap().drop_missing();
    assert_eq!(table.n_rows(), 0);

    let err = StringIndexer::fit(table.column("income_class").unwrap()).unwrap_err();
    assert!(matches!(err, IndexerError::EmptyColumn(_)));
}

#[test]
fn csv_files_load_like_readers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TWELVE_ROWS.as_bytes()).unwrap();
    file.flush().unwrap();

    let from_file = DataTable::from_csv_path(file.path()).unwrap();
    let from_reader = DataTable::from_reader(TWELVE_ROWS.as_bytes()).unwrap();
    assert_eq!(from_file.n_rows(), from_reader.n_rows());
    assert_eq!(from_file.columns(), from_reader.columns());
}

#[test]
fn shipped_income_dataset_trains_both_models() {
    let dataset_path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/income.csv");
    let table = DataTable::from_csv_path(dataset_path).unwrap();
    assert!(table.column("income_class").is_some());

    let cleaned = table.drop_missing();
    assert!(cleaned.n_rows() > 30);

    let partition = cleaned.partition_columns("income_class").unwrap();
    assert!(!partition.categorical.is_empty());
    assert!(!partition.numerical.is_empty());

    let indexers: Vec<StringIndexer> = partition
        .categorical
        .iter()
        .map(|name| StringIndexer::fit(cleaned.column(name).unwrap()).unwrap())
        .collect();
    let label_indexer =
        StringIndexer::fit(cleaned.column("income_class").unwrap()).unwrap();
    let assembler = FeatureAssembler::new(partition.categorical, partition.numerical);
    let dataset = assembler.assemble(&cleaned, &indexers, &label_indexer).unwrap();

    let (train, test) = train_test_split(&dataset, 0.8, 42).unwrap();
    assert_eq!(train.n_samples() + test.n_samples(), dataset.n_samples());

    let dt_params = DecisionTreeParams::builder().max_bins(100).build().unwrap();
    let dt = DecisionTreeModel::fit(&train, dt_params).unwrap();
    let rf_params = RandomForestParams::builder()
        .n_trees(100)
        .max_bins(100)
        .build()
        .unwrap();
    let rf = RandomForestModel::fit(&train, rf_params).unwrap();
    assert_eq!(rf.n_trees(), 100);

    let labels = test.labels().unwrap();
    for accuracy in [
        MulticlassAccuracy.compute(dt.predict(&test).view(), labels),
        MulticlassAccuracy.compute(rf.predict(&test).view(), labels),
    ] {
        assert!((0.0..=1.0).contains(&accuracy));
    }
}
