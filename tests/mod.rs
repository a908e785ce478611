use nalgebra::{DMatrix, DVector};
use rand::{Rng, SeedableRng, rngs::StdRng};
use approx::assert_relative_eq;
use uapca::*;

const EPS : f64 = 1E-10;

fn random_matrix(rng : &mut StdRng, nrows : usize, ncols : usize) -> DMatrix<f64> {
    DMatrix::from_fn(nrows, ncols, |_, _| rng.gen_range(-2.0..2.0) )
}

/// Random positive semi-definite covariance, as L L^T.
fn random_normal(rng : &mut StdRng, dim : usize) -> anyhow::Result<MultiNormal> {
    let mu = DVector::from_fn(dim, |_, _| rng.gen_range(-5.0..5.0) );
    let l = random_matrix(rng, dim, dim);
    let sigma = &l * l.transpose();
    Ok(MultiNormal::new(mu, linalg::build_symmetric(&sigma))?)
}

fn assert_orthonormal_rows(m : &DMatrix<f64>) {
    let gram = m * m.transpose();
    assert_relative_eq!(gram, DMatrix::identity(m.nrows(), m.nrows()), epsilon = EPS);
}

#[test]
fn affine_propagation_law() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    for (dim, k) in [(2, 1), (3, 3), (5, 2), (4, 6)].iter() {
        let mn = random_normal(&mut rng, *dim)?;
        let a = random_matrix(&mut rng, *k, *dim);
        let b = DVector::from_fn(*k, |_, _| rng.gen_range(-1.0..1.0) );
        let out = mn.affine_transformation(&a, &b)?;
        assert_relative_eq!(out.cov(), &a * mn.cov() * a.transpose(), epsilon = 1E-12, max_relative = 1E-12);
        assert_relative_eq!(*out.mean(), &a * mn.mean() + &b, epsilon = 1E-12, max_relative = 1E-12);
    }
    Ok(())
}

#[test]
fn projected_point_covariance_is_zero() {
    let mut rng = StdRng::seed_from_u64(11);
    let p = Point::from_slice(&[0.3, -4.0, 2.5, 1.0]).unwrap();
    let proj = random_matrix(&mut rng, 2, 4);
    let out = p.project(&proj).unwrap();
    assert_eq!(out.cov(), DMatrix::zeros(2, 2));
}

#[test]
fn fitted_basis_is_sorted_and_orthonormal() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(3);
    let mut distrs : Vec<Observation> = Vec::new();
    for i in 0..12 {
        if i % 3 == 0 {
            let mu = DVector::from_fn(4, |_, _| rng.gen_range(-3.0..3.0) );
            distrs.push(Point::new(mu)?.into());
        } else {
            distrs.push(random_normal(&mut rng, 4)?.into());
        }
    }
    let pca = UaPca::fit(&distrs, Some(0.5))?;
    let lengths = pca.lengths();
    for i in 1..lengths.nrows() {
        assert!(lengths[i - 1] >= lengths[i]);
    }
    assert_orthonormal_rows(pca.vectors());
    Ok(())
}

#[test]
fn two_unit_normals_spread_along_diagonal() -> anyhow::Result<()> {
    let distrs = vec![
        MultiNormal::from_slices(&[0.0, 0.0], &[1.0, 0.0, 0.0, 1.0])?,
        MultiNormal::from_slices(&[1.0, 1.0], &[1.0, 0.0, 0.0, 1.0])?
    ];
    let pca = UaPca::fit(&distrs, None)?;
    assert!(pca.lengths()[0] >= pca.lengths()[1]);

    // Compare directions up to sign.
    let lead = pca.vectors().row(0).transpose();
    let diag = DVector::from_column_slice(&[1.0, 1.0]).normalize();
    assert_relative_eq!(lead.dot(&diag).abs(), 1.0, epsilon = EPS);
    Ok(())
}

#[test]
fn tracer_over_standard_normal() -> anyhow::Result<()> {
    let tracer = factor_tracer(&[MultiNormal::standard(2)], 2)?;
    for s in [1.0, 2.0, 0.25].iter() {
        let mut pts : Vec<Vec<f64>> = tracer.trace(*s).iter()
            .map(|p| p.iter().map(|x| x.abs() ).collect() )
            .collect();
        pts.sort_by(|a, b| b[0].total_cmp(&a[0]) );
        assert_relative_eq!(pts[0][0], *s, epsilon = EPS);
        assert_relative_eq!(pts[0][1], 0.0, epsilon = EPS);
        assert_relative_eq!(pts[1][0], 0.0, epsilon = EPS);
        assert_relative_eq!(pts[1][1], *s, epsilon = EPS);
    }
    Ok(())
}

#[test]
fn full_rank_transform_is_lossless() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(19);
    let distrs = (0..6).map(|_| random_normal(&mut rng, 3) ).collect::<anyhow::Result<Vec<_>>>()?;
    let pca = UaPca::fit(&distrs, None)?;
    let out = pca.transform(&distrs, 3)?;
    let back = pca.vectors().transpose();
    for (src, dst) in distrs.iter().zip(out.iter()) {
        let restored = dst.project(&back)?;
        assert_relative_eq!(*restored.mean(), *src.mean(), epsilon = 1E-9);
        assert_relative_eq!(restored.cov(), src.cov(), epsilon = 1E-9);
        assert_relative_eq!(dst.cov().trace(), src.cov().trace(), epsilon = 1E-9);
    }
    Ok(())
}

#[test]
fn reduced_transform_is_idempotent_under_identity() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(23);
    let distrs = (0..5).map(|_| random_normal(&mut rng, 4) ).collect::<anyhow::Result<Vec<_>>>()?;
    let pca = UaPca::fit(&distrs, None)?;
    let reduced = pca.transform(&distrs, 2)?;
    let ident = DMatrix::identity(2, 2);
    for d in reduced.iter() {
        let again = d.project(&ident)?;
        assert_relative_eq!(*again.mean(), *d.mean(), epsilon = EPS);
        assert_relative_eq!(again.cov(), d.cov(), epsilon = EPS);
    }
    Ok(())
}

#[test]
fn persisted_basis_transforms_new_sets() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(29);
    let train = (0..8).map(|_| random_normal(&mut rng, 3) ).collect::<anyhow::Result<Vec<_>>>()?;
    let pca = UaPca::fit(&train, None)?;
    let json = serde_json::to_string(&pca)?;
    let restored : UaPca = serde_json::from_str(&json)?;

    let query = vec![Point::from_slice(&[1.0, 0.0, -1.0])?, Point::from_slice(&[0.0, 2.0, 2.0])?];
    for k in 1..=3 {
        let a = pca.transform(&query, k)?;
        let b = restored.transform(&query, k)?;
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.dim(), k);
            assert_relative_eq!(*pa.mean(), *pb.mean(), epsilon = EPS);
        }
    }
    Ok(())
}

#[test]
fn sampler_reproduces_point() -> anyhow::Result<()> {
    let p = Point::from_slice(&[4.0, -1.0])?;
    let samples = Sampler::new(&p)?.sample_n(5);
    assert_eq!(samples.shape(), (5, 2));
    for row in samples.row_iter() {
        assert_eq!(row.transpose(), *p.mean());
    }
    Ok(())
}
