use elmkit::metrics::accuracy_score;
use elmkit::preprocessing::{normalize, one_hot};
use elmkit::{ElmClassifier, ElmError, Matrix, Vector};
use ndarray::{Axis, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn make_blobs(centers: &[[f64; 2]], n_per_class: usize, rng: &mut StdRng) -> (Matrix, Vector) {
    let noise = Normal::new(0.0, 0.6).unwrap();
    let mut x = Matrix::random_using((centers.len() * n_per_class, 2), noise, rng);
    let mut y = Vector::zeros(centers.len() * n_per_class);

    for (class, center) in centers.iter().enumerate() {
        let rows = class * n_per_class..(class + 1) * n_per_class;
        let mut block = x.slice_mut(s![rows.clone(), ..]);
        block += &ndarray::arr1(center).insert_axis(Axis(0));
        y.slice_mut(s![rows]).fill(class as f64);
    }
    (x, y)
}

fn main() -> Result<(), ElmError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Extreme Learning Machine Example ===\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let centers = [[0.0, 4.0], [4.0, 0.0], [-3.0, -3.0]];
    let (x_train, y_train) = make_blobs(&centers, 60, &mut rng);
    let (x_test, y_test) = make_blobs(&centers, 30, &mut rng);

    let x_train = normalize(&x_train);
    let x_test = normalize(&x_test);
    println!("Training samples: {}, test samples: {}", x_train.nrows(), x_test.nrows());

    println!("\n1. Label targets, more samples than hidden units (primal solve)");
    let mut elm = ElmClassifier::new(50).c(10.0).random_state(7);
    elm.fit(&x_train, &y_train, None)?;
    println!("   Strategy: {:?}", elm.solve_strategy.unwrap());
    println!("   Classes: {:?}", elm.classes.as_ref().unwrap());
    println!("   Train accuracy: {:.4}", elm.score(&x_train, &y_train)?);
    println!("   Test accuracy: {:.4}", elm.score(&x_test, &y_test)?);

    println!("\n2. One-hot targets, more hidden units than samples (dual solve)");
    let every_third: Vec<usize> = (0..x_train.nrows()).step_by(3).collect();
    let small_x = x_train.select(Axis(0), &every_third);
    let small_y = y_train.select(Axis(0), &every_third);
    let targets = one_hot(&small_y, 3)?;

    let mut wide = ElmClassifier::new(200).random_state(7);
    wide.fit(&small_x, &targets, None)?;
    println!("   Strategy: {:?}", wide.solve_strategy.unwrap());
    println!("   Test accuracy: {:.4}", wide.score(&x_test, &y_test)?);

    println!("\n3. Sample-weighted fit with dropout on the input weights");
    let weights = y_train.mapv(|label| if label == 2.0 { 3.0 } else { 1.0 });
    let mut weighted = ElmClassifier::new(50).dropout_prob(0.2).random_state(7);
    weighted.fit(&x_train, &y_train, Some(&weights))?;
    let predictions = weighted.predict_labels(&x_test)?;
    let truth = y_test.mapv(|label| label as usize);
    println!("   Strategy: {:?}", weighted.solve_strategy.unwrap());
    println!("   Test accuracy: {:.4}", accuracy_score(&truth, &predictions)?);

    println!("\nRaw scores for the first three test samples:");
    let scores = weighted.predict_scores(&x_test.slice(s![..3, ..]).to_owned())?;
    for (i, row) in scores.axis_iter(Axis(0)).enumerate() {
        println!("   Sample {}: {:?} (actual class {})", i + 1, row.to_vec(), y_test[i]);
    }

    Ok(())
}
