use crate::error::{ReportError, Result};
use crate::model::{CommitRecord, DateRange};
use crate::run::CommitSource;
use chrono::DateTime;
use gix::{ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
    name: String,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`; parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo_path = path.as_ref().to_path_buf();
        let repo = match gix::open(&repo_path) {
            Ok(repo) => repo,
            Err(gix::open::Error::NotARepository { .. }) => {
                return Err(ReportError::NotARepository(repo_path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        let name = super::repo_name(&path);

        Ok(Self { repo, path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn branch_tips(&self) -> Result<Vec<ObjectId>> {
        let platform = self
            .repo
            .references()
            .map_err(|e| ReportError::GitRepo(format!("Cannot read references: {e}")))?;
        let branches = platform
            .local_branches()
            .map_err(|e| ReportError::GitRepo(format!("Cannot list branches: {e}")))?;

        let mut tips = Vec::new();
        for branch in branches {
            let mut branch = branch.map_err(|e| ReportError::GitRepo(format!("Bad branch reference: {e}")))?;
            let id = branch
                .peel_to_id_in_place()
                .map_err(|e| ReportError::GitRepo(format!("Cannot resolve branch: {e}")))?;
            tips.push(id.detach());
        }
        Ok(tips)
    }

    /// Commits reachable from any local branch, each reported once.
    pub fn collect_commits(&self, range: &DateRange) -> Result<Vec<CommitRecord>> {
        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = self.branch_tips()?.into();

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Scanning {}...", self.name));

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit
                .time()
                .map_err(|e| ReportError::GitRepo(format!("Bad commit time in {commit_id}: {e}")))?
                .seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| ReportError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            for pid in commit.parent_ids() {
                stack.push_back(pid.detach());
            }

            if !range.contains(&timestamp) {
                continue;
            }

            let author = commit.author()?;
            commits.push(CommitRecord {
                author_name: author.name.to_string(),
                timestamp,
                message: commit.message_raw()?.to_string(),
            });

            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(commits)
    }
}

impl CommitSource for GitRepo {
    fn commits(&self, window: &DateRange) -> Result<Vec<CommitRecord>> {
        self.collect_commits(window)
    }
}
