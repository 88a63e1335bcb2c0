mod plan_batches;
