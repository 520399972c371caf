extern crate speciesrank;

use speciesrank::{
    datasets::Dataset,
    estimators::{
        error::Result,
        frequency::ClassFrequency,
        hyperparams::{KNeighborsParams, RankedClassifierParams},
        knn::KNeighbors,
        param_guard::ParamGuard,
        ranked::RankedClassifier,
        traits::{RankedScorer, TrainablePredictor},
    },
    helpers::test_helpers::generate_random_blobs,
};

fn main() -> Result<()> {
    env_logger::init();

    let (x, y) = generate_random_blobs(500, 6, 40);
    let dataset = Dataset::from((x, y));
    let (train, test) = dataset.train_test_split(0.2, 42)?;

    // Species prior baseline
    let params = RankedClassifierParams::new().ranking_size(30).check()?;
    let mut baseline = RankedClassifier::new(params.clone(), ClassFrequency::new());
    baseline.fit_dataset(&train)?;

    // Nearest neighbours
    let knn = KNeighbors::new(KNeighborsParams::new().n_neighbors(15).check()?);
    let mut clf = RankedClassifier::new(params, knn);
    clf.fit_dataset(&train)?;

    let rankings = [
        ("frequency", baseline.predict_with_proba(test.records().view())?),
        ("knn", clf.predict_with_proba(test.records().view())?),
    ];

    for (name, (y_pred, proba_pred)) in rankings {
        let y_true = test.targets().view();
        let mean_rank = match clf.mean_rank_score(y_true, y_pred.view())? {
            Some(rank) => format!("{:.2}", rank),
            None => "undefined".to_string(),
        };
        println!(
            "{:>9} :: top30 {:.3} | mrr {:.3} | accuracy {:.3} | mean rank {} | confidence {:.3}",
            name,
            clf.top30_score(y_true, y_pred.view())?,
            clf.mrr_score(y_true, y_pred.view())?,
            clf.accuracy_score(y_true, y_pred.view())?,
            mean_rank,
            clf.mean_sum_proba_rank(proba_pred.view())?,
        );
    }

    Ok(())
}
