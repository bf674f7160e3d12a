// tests/parallel_tests.rs

// Import necessary types from the qvec crate
use qvec::{ParallelExecutor, PhaseEstimator, QvecError, StateVector, argmax, measure};
use qvec::gates::grover_iteration;

use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn even_partition_aggregates_every_unit() -> Result<(), QvecError> {
    // total_units = 16, worker_count = 4: four chunks of four.
    let executor = ParallelExecutor::new(4)?;
    let table = executor.run(16, |unit| Ok(unit as u64))?;

    assert_eq!(table.total(), 16);
    assert_eq!(table.len(), 16);
    Ok(())
}

#[test]
fn uneven_partition_still_covers_the_remainder() -> Result<(), QvecError> {
    // total_units = 15, worker_count = 4. The legacy integer-division split
    // would assign 3 units to each of 4 workers and drop 3 units on the
    // floor; the executor spreads the remainder instead.
    let executor = ParallelExecutor::new(4)?;
    let table = executor.run(15, |unit| Ok(unit as u64))?;

    assert_eq!(table.total(), 15);
    for unit in 0..15u64 {
        assert_eq!(table.count(unit), 1, "unit {} was not processed exactly once", unit);
    }
    Ok(())
}

#[test]
fn xor_mask_image_is_a_permutation() -> Result<(), QvecError> {
    // Hidden-XOR-mask scenario: every worker evaluates x ^ mask over its
    // slice of the domain; the merged table must hold each image value once.
    let mask = 0b1010u64;
    let executor = ParallelExecutor::new(4)?;
    let table = executor.run(16, |x| Ok(x as u64 ^ mask))?;

    assert_eq!(table.total(), 16);
    for value in 0..16u64 {
        assert_eq!(table.count(value), 1, "image value {} missing", value);
    }
    Ok(())
}

#[test]
fn grover_trials_agree_across_workers() -> Result<(), QvecError> {
    // Each worker amplifies the same marked index on its own private vector;
    // every trial must report that index.
    let target = 3usize;
    let executor = ParallelExecutor::new(4)?;

    let table = executor.run(12, |_trial| {
        let mut state = StateVector::uniform(3)?;
        grover_iteration(&mut state, target)?;
        Ok(argmax(&state) as u64)
    })?;

    assert_eq!(table.count(target as u64), 12);
    Ok(())
}

#[test]
fn phase_estimation_histogram_collects_all_trials() -> Result<(), QvecError> {
    // One shared estimator (its caches are lock-protected), one private
    // vector per trial, stochastic measurement seeded per trial.
    let estimator = PhaseEstimator::new();
    let executor = ParallelExecutor::new(4)?;

    let table = executor.run(16, |trial| {
        let mut state = StateVector::new(4)?;
        estimator.estimate(&mut state, 7, 15)?;
        let mut rng = StdRng::seed_from_u64(trial as u64);
        Ok(measure(&state, &mut rng)? as u64)
    })?;

    assert_eq!(table.total(), 16);
    Ok(())
}

#[test]
fn failing_worker_surfaces_instead_of_partial_results() -> Result<(), QvecError> {
    let executor = ParallelExecutor::new(4)?;
    let outcome = executor.run(16, |unit| {
        if unit >= 12 {
            // Provoke a real engine error inside the last worker's chunk.
            let state = StateVector::new(2)?;
            state.probability(99)?;
        }
        Ok(unit as u64)
    });

    match outcome {
        Err(QvecError::WorkerFailure { message }) => {
            assert!(
                message.contains("worker 3"),
                "failure set should name the failing worker, got: {}",
                message
            );
        }
        other => panic!("expected WorkerFailure, got {:?}", other),
    }
    Ok(())
}
