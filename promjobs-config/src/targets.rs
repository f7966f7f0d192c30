use crate::prometheus::Document;

/// Every `(job name, target)` pair of the document, in document order.
///
/// Jobs keep their `scrape_configs` order, and targets follow their static
/// group and position inside it. Jobs without targets yield nothing.
pub fn targets(document: &Document) -> impl Iterator<Item = (&str, &str)> + '_ {
    document.jobs.iter().flat_map(|job| {
        let name = job.job_name.as_str();
        job.targets().map(move |target| (name, target))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prometheus::{Job, StaticTargetGroup};
    use pretty_assertions::assert_eq;

    fn job(name: &str, groups: &[&[&str]]) -> Job {
        Job {
            job_name: name.to_string(),
            static_configs: groups
                .iter()
                .map(|targets| StaticTargetGroup {
                    targets: targets.iter().map(|target| target.to_string()).collect(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn walks_jobs_groups_and_targets_in_order() {
        let document = Document {
            jobs: vec![
                job("web", &[&["10.0.0.1:9100", "10.0.0.2:9100"], &["10.0.0.3:9100"]]),
                job("db", &[&["10.0.1.1:9187"]]),
            ],
            ..Default::default()
        };

        let pairs: Vec<_> = targets(&document).collect();
        assert_eq!(
            pairs,
            vec![
                ("web", "10.0.0.1:9100"),
                ("web", "10.0.0.2:9100"),
                ("web", "10.0.0.3:9100"),
                ("db", "10.0.1.1:9187"),
            ]
        );
    }

    #[test]
    fn empty_collections_yield_nothing() {
        let document = Document {
            jobs: vec![job("empty", &[]), job("hollow", &[&[]]), job("db", &[&["db:9187"]])],
            ..Default::default()
        };

        let pairs: Vec<_> = targets(&document).collect();
        assert_eq!(pairs, vec![("db", "db:9187")]);
        assert_eq!(targets(&Document::default()).count(), 0);
    }
}
