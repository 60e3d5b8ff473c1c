use rand::distributions::{Distribution, Uniform};

pub mod linear_fold;

/// Generate a vector of values from a uniform distribution
/// # Arguments
/// `size` Size of the vector to generate
pub fn gen_uniform_vec(size: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let uniform = Uniform::from(0.0..1001.0);
    (0..size).map(|_| uniform.sample(&mut rng)).collect()
}

/// Generate a vector of integers from a uniform distribution over `[low, high)`
/// # Arguments
/// `size` Size of the vector to generate
/// `low` Inclusive lower bound
/// `high` Exclusive upper bound
pub fn gen_uniform_int_vec(size: usize, low: i64, high: i64) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    let uniform = Uniform::from(low..high);
    (0..size).map(|_| uniform.sample(&mut rng)).collect()
}

/// Generate a vector of ascending values 0, 1, .., (size - 1)
/// # Arguments
/// `size` Size of the vector to generate
pub fn gen_asc_vec(size: usize) -> Vec<i64> {
    (0..size as i64).collect()
}

/// Generate a random inclusive range `[start, end]` within `0..length`
/// # Arguments
/// `length` Number of elements the range is drawn from, must be positive
pub fn gen_range(length: usize) -> (usize, usize) {
    let mut rng = rand::thread_rng();
    let uniform = Uniform::from(0..length);
    let a = uniform.sample(&mut rng);
    let b = uniform.sample(&mut rng);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
